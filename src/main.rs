use clap::{CommandFactory, Parser};
use deq::{
    lang::program::Program,
    runtime::interpreter::{Config, WordManagement, deq_interpreter::DeqInterpreter},
};
use log::debug;
use std::{
    io::{self, Write},
    process::{ExitCode, Termination},
};

/// Run a deq script, a language whose only storage is a double-ended queue.
#[derive(Parser, Debug)]
#[command(name = "deq", version, about, long_about = None)]
struct Args {
    /// Print the deq and call stack after every instruction.
    #[arg(short, long)]
    debug: bool,

    /// Stop with an error after this many instructions.
    #[arg(long, value_name = "N", env = "DEQ_MAX_STEPS")]
    max_steps: Option<u64>,

    /// List the operation words and exit.
    #[arg(long)]
    words: bool,

    /// The script to run.
    file: Option<String>,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    if args.words {
        let program = match Program::new(Vec::new()) {
            Ok(program) => program,
            Err(error) => return error.report(),
        };

        let interpreter = DeqInterpreter::new(program, Config::default(), io::sink());
        print!("{}", interpreter.dictionary());

        return ExitCode::SUCCESS;
    }

    let Some(path) = args.file else {
        eprintln!("No input file was provided!");
        let _ = Args::command().print_help();
        return ExitCode::FAILURE;
    };

    let (program, diagnostics) = match Program::from_file(&path) {
        Ok(loaded) => loaded,
        Err(error) => return error.report(),
    };

    for diagnostic in &diagnostics {
        eprintln!("{}", diagnostic);
    }

    debug!("loaded {} tokens from {}", program.len(), path);

    let config = Config {
        debug: args.debug,
        step_limit: args.max_steps,
    };

    let mut interpreter = DeqInterpreter::new(program, config, io::stdout().lock());

    match interpreter.run() {
        Ok(outcome) => {
            debug!("{:?} after {} steps", outcome, interpreter.steps());
            ExitCode::SUCCESS
        }

        Err(error) => {
            // Whatever the script wrote so far comes before the error.
            let _ = interpreter.into_output().flush();
            error.report()
        }
    }
}
