use std::io;

use anyhow::{bail, Context};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mica::{parse_interactive, parse_source, Interpreter, ParserState};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    match args.len() {
        1 => run_repl(),
        2 => run_script(&args[1]),
        _ => bail!("usage: mica [script]"),
    }
}

fn run_script(filename: &str) -> anyhow::Result<()> {
    let source =
        std::fs::read_to_string(filename).with_context(|| format!("reading {filename}"))?;
    info!(filename, bytes = source.len(), "running script");

    let program = parse_source(&source)?;
    let mut interpreter = Interpreter::new(io::stdout());
    let result = interpreter.run(&program).map_err(mica::Error::from)?;
    println!("{result}");
    Ok(())
}

fn run_repl() -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;
    #[cfg(feature = "with-file-history")]
    if rl.load_history("history.txt").is_err() {
        println!("No previous history.");
    }

    let mut interpreter = Interpreter::new(io::stdout());
    let mut input = String::new();
    loop {
        let prompt = if input.is_empty() { ">> " } else { ".. " };
        match rl.readline(prompt) {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                input.push_str(&line);
                input.push('\n');
                match parse_interactive(&input) {
                    ParserState::ContinuationNeeded => continue,
                    ParserState::Complete(program) => match interpreter.execute(&program) {
                        Ok(Some(value)) => println!("{value}"),
                        Ok(None) => {}
                        Err(err) => eprintln!("runtime error: {err}"),
                    },
                    ParserState::Error(err) => eprintln!("{err}"),
                }
                input.clear();
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    #[cfg(feature = "with-file-history")]
    rl.save_history("history.txt")?;
    Ok(())
}
