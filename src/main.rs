//! filterq - completion for schema-driven filter queries
//!
//! # Usage
//!
//! ```bash
//! # Interactive editor with Tab completion
//! filterq --schema shop.json
//!
//! # One-shot completion
//! filterq --schema shop.json complete "customer.na"
//! ```

use tracing::debug;

use filterq::cli::CliInterface;
use filterq::error::Result;
use filterq::formatter::Formatter;
use filterq::parser::tokenize;
use filterq::repl::ReplEngine;

/// Application entry point
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle subcommands or start the interactive editor
fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_subcommand()? {
        return Ok(());
    }

    run_interactive_mode(&cli)
}

/// Run the interactive editor; each submitted line is echoed as tokens
fn run_interactive_mode(cli: &CliInterface) -> Result<()> {
    let engine = cli.completion_engine()?;
    cli.print_banner(&engine);

    let config = cli.config();
    let formatter = Formatter::from_config(&config.display);
    let mut repl = ReplEngine::new(engine, &config.history, config.display.syntax_highlighting)?;

    while repl.is_running() {
        let line = match repl.read_line()? {
            Some(line) if !line.trim().is_empty() => line,
            Some(_) => continue,
            None => break,
        };

        debug!("Submitted: {line}");
        match formatter.format_tokens(&tokenize(&line)) {
            Ok(output) => println!("{}", output),
            Err(e) => eprintln!("{}", e),
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Initialize logging from the effective configuration
///
/// Logs go to stderr so that `complete` output stays machine-readable.
fn initialize_logging(cli: &CliInterface) {
    let logging = &cli.config().logging;

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(logging.level.to_tracing_level())
        .with_target(false)
        .with_writer(std::io::stderr);

    if logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
