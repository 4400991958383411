use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::trace;

use super::{RuntimeError, Value};
use crate::parser::{Locatable, Name};

/// Append-only name to value bindings of one run.
#[derive(Debug, Default)]
pub struct Environment {
    variables: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, which must not be bound yet.
    pub fn define(&mut self, name: &Name, value: Value) -> Result<(), RuntimeError> {
        match self.variables.entry(name.name.clone()) {
            Entry::Occupied(_) => Err(RuntimeError::AlreadyDefined {
                name: name.name.clone(),
                span: name.span(),
            }),
            Entry::Vacant(slot) => {
                trace!(name = %name.name, %value, "bound variable");
                slot.insert(value);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &Name) -> Result<&Value, RuntimeError> {
        self.variables
            .get(&name.name)
            .ok_or_else(|| RuntimeError::NotDefined {
                name: name.name.clone(),
                span: name.span(),
            })
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
