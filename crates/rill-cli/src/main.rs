use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use rill_cli::eval::eval_program;
use rill_cli::object::{Environment, Value};
use rill_cli::repl;

/// Maximum source file size in bytes (1MB)
const MAX_SOURCE_SIZE: usize = 1_000_000;

#[derive(Parser, Debug)]
#[command(name = "rill")]
#[command(about = "rill: a small dynamically-typed scripting language")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive prompt
    Repl,

    /// Evaluate a rill source file
    Run {
        /// Path to the source file
        file: String,
    },

    /// Parse a source file and dump the AST
    Parse {
        /// Path to the source file
        file: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },
}

#[derive(ValueEnum, Clone, Debug)]
enum Format {
    Pretty,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Repl) => cmd_repl(),
        Some(Commands::Run { file }) => cmd_run(&file),
        Some(Commands::Parse { file, format }) => cmd_parse(&file, format),
    }
}

fn cmd_repl() -> Result<()> {
    println!("Welcome to rill!");
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    repl::start(stdin.lock(), &mut stdout)?;
    Ok(())
}

fn load_source(path: &str) -> Result<String> {
    let src = std::fs::read_to_string(path)?;

    if src.len() > MAX_SOURCE_SIZE {
        eprintln!(
            "Error: source file exceeds {}MB limit ({} bytes)",
            MAX_SOURCE_SIZE / 1_000_000,
            src.len()
        );
        std::process::exit(1);
    }

    Ok(src)
}

fn parse_or_exit(src: &str) -> rill_ast::ast::Program {
    let (program, errors) = rill_parse::parse(src);
    if !errors.is_empty() {
        eprintln!("parser errors:");
        for message in &errors {
            eprintln!("\t{message}");
        }
        std::process::exit(1);
    }
    program
}

fn cmd_run(file: &str) -> Result<()> {
    let src = load_source(file)?;
    let program = parse_or_exit(&src);

    let env = Environment::new();
    match eval_program(&program, &env) {
        Value::Error(message) => {
            eprintln!("Error: {message}");
            std::process::exit(1);
        }
        Value::Null => {}
        value => println!("{value}"),
    }
    Ok(())
}

fn cmd_parse(file: &str, format: Format) -> Result<()> {
    let src = load_source(file)?;
    let program = parse_or_exit(&src);

    match format {
        Format::Pretty => println!("{program:#?}"),
        Format::Json => println!("{}", serde_json::to_string_pretty(&program)?),
    }
    Ok(())
}
