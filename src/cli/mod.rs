//! Command-line interface for filterq
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and command-line overrides
//! - Schema and value-source loading for the completion engine
//! - One-shot subcommands (`complete`, `tokens`, `config`, ...)

mod completion;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::completion::{CompletionEngine, StaticValueSource};
use crate::config::{Config, LogLevel, OutputFormat};
use crate::error::{FilterqError, Result};
use crate::formatter::Formatter;
use crate::parser::tokenize;
use crate::schema::SchemaGraph;

pub use completion::{generate_completion, parse_shell};

/// filterq - completion for schema-driven filter queries
#[derive(Parser, Debug)]
#[command(
    name = "filterq",
    version,
    about = "Context-aware completion for schema-driven filter queries",
    long_about = "Suggests field paths, comparison operators, values and logical connectors
for a small record filter language, based on a JSON schema of models and relations."
)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Schema JSON file
    #[arg(short = 's', long, value_name = "FILE", global = true)]
    pub schema: Option<PathBuf>,

    /// Model completion starts from (defaults to the schema's currentModel)
    #[arg(short = 'm', long, value_name = "NAME", global = true)]
    pub model: Option<String>,

    /// JSON table of field values for value completion
    #[arg(long, value_name = "FILE", global = true)]
    pub values: Option<PathBuf>,

    /// Output format (plain, json)
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv", global = true)]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for filterq
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print completions for a query
    Complete {
        /// Query text
        #[arg(value_name = "TEXT")]
        text: String,

        /// Cursor position in characters (defaults to the end of the text)
        #[arg(long, value_name = "N")]
        cursor: Option<usize>,

        /// Also print the resolved context
        #[arg(long)]
        explain: bool,
    },

    /// Print the token stream of a query
    Tokens {
        /// Query text
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Start the interactive editor (default)
    Repl,

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish, powershell, elvish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show version information
    Version,
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface from the process arguments
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Create a CLI interface from already parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {}", e);
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        Self::apply_args_to_config(&mut config, args);
        Ok(config)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Apply CLI arguments to configuration
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        Self::apply_schema_args(config, args);
        Self::apply_display_args(config, args);
        Self::apply_logging_args(config, args);
    }

    fn apply_schema_args(config: &mut Config, args: &CliArgs) {
        if let Some(path) = &args.schema {
            config.schema.path = Some(path.clone());
        }
        if let Some(model) = &args.model {
            config.schema.model = Some(model.clone());
        }
        if let Some(values) = &args.values {
            config.schema.values = Some(values.clone());
        }
    }

    /// Apply display-related CLI arguments to configuration
    fn apply_display_args(config: &mut Config, args: &CliArgs) {
        if let Some(format_str) = &args.format {
            config.display.format = Self::parse_output_format(format_str);
        }

        if args.no_color {
            config.display.color_output = false;
            config.display.syntax_highlighting = false;
        }
    }

    /// Apply logging-related CLI arguments to configuration
    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Parse output format string
    fn parse_output_format(format_str: &str) -> OutputFormat {
        match format_str.to_lowercase().as_str() {
            "plain" | "text" => OutputFormat::Plain,
            "json" => OutputFormat::Json,
            _ => {
                eprintln!("Warning: Unknown format '{}', using plain", format_str);
                OutputFormat::Plain
            }
        }
    }

    /// Load the schema graph named by the configuration
    pub fn load_schema(&self) -> Result<SchemaGraph> {
        let path = self.config.schema.path.as_ref().ok_or_else(|| {
            FilterqError::Generic(
                "No schema given. Use --schema <FILE> or set schema.path in the config".to_string(),
            )
        })?;
        SchemaGraph::from_file(path)
    }

    /// Build the completion engine: schema, root model and value source
    pub fn completion_engine(&self) -> Result<CompletionEngine> {
        let schema = self.load_schema()?;
        let mut engine = CompletionEngine::new(Arc::new(schema));

        if let Some(model) = &self.config.schema.model {
            engine = engine.with_root_model(model.clone());
        }
        if let Some(path) = &self.config.schema.values {
            debug!("Loading value table from {}", path.display());
            engine = engine.with_value_source(Arc::new(StaticValueSource::from_file(path)?));
        }

        Ok(engine)
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if subcommand was handled, false to start the REPL
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Complete {
                text,
                cursor,
                explain,
            }) => {
                self.run_complete(text, *cursor, *explain)?;
                Ok(true)
            }
            Some(Commands::Tokens { text }) => {
                self.run_tokens(text)?;
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                generate_completion(shell)?;
                Ok(true)
            }
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Repl) | None => Ok(false),
        }
    }

    fn formatter(&self) -> Formatter {
        Formatter::from_config(&self.config.display)
    }

    /// Run the completion pipeline once and print the result
    fn run_complete(&self, text: &str, cursor: Option<usize>, explain: bool) -> Result<()> {
        let engine = self.completion_engine()?;
        let cursor = cursor.unwrap_or_else(|| text.chars().count());
        let formatter = self.formatter();

        if explain {
            println!("{}", formatter.format_context(&engine.context(text, cursor))?);
        }

        let suggestions = engine.complete(text, cursor);
        if !suggestions.is_empty() || self.config.display.format.is_json() {
            println!("{}", formatter.format_suggestions(&suggestions)?);
        }
        Ok(())
    }

    /// Print the token stream of a query
    fn run_tokens(&self, text: &str) -> Result<()> {
        let output = self.formatter().format_tokens(&tokenize(text))?;
        if !output.is_empty() {
            println!("{}", output);
        }
        Ok(())
    }

    /// Show version information
    fn show_version(&self) {
        println!("filterq version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    }

    /// Handle config subcommand
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file();
        }

        if show || !validate {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("❌ Configuration file does not exist");
            return;
        }

        match Config::load_from_file(Some(path.as_path())) {
            Ok(config) => match config.validate() {
                Ok(_) => println!("✅ Configuration is valid"),
                Err(e) => println!("❌ Configuration validation failed: {}", e),
            },
            Err(e) => println!("❌ Failed to load configuration: {}", e),
        }
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Configuration file: {}", path.display());
        println!();
        println!("=== Effective Configuration ===");
        println!();
        println!("{}", self.config.to_toml()?);
        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_config_path)
    }

    /// Print banner with version and schema info
    pub fn print_banner(&self, engine: &CompletionEngine) {
        if !self.args.quiet {
            println!("filterq {}", env!("CARGO_PKG_VERSION"));
            let models: Vec<&str> = engine.schema().model_names().collect();
            println!(
                "Models: {} (root: {})",
                if models.is_empty() { "(none)".to_string() } else { models.join(", ") },
                engine.root_model().unwrap_or("(none)")
            );
            println!("Press Tab to complete, Ctrl-D to exit.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_args_parsing() {
        let args = parse(&["filterq"]);
        assert!(args.schema.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_args_with_flags() {
        let args = parse(&["filterq", "--no-color", "--quiet", "-s", "shop.json", "-m", "Order"]);
        assert!(args.no_color);
        assert!(args.quiet);
        assert_eq!(args.schema, Some(PathBuf::from("shop.json")));
        assert_eq!(args.model.as_deref(), Some("Order"));
    }

    #[test]
    fn test_complete_subcommand() {
        let args = parse(&["filterq", "complete", "customer.na", "--cursor", "5"]);
        match args.command {
            Some(Commands::Complete {
                text,
                cursor,
                explain,
            }) => {
                assert_eq!(text, "customer.na");
                assert_eq!(cursor, Some(5));
                assert!(!explain);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse(&["filterq", "complete", "x", "--schema", "s.json", "--format", "json"]);
        assert_eq!(args.schema, Some(PathBuf::from("s.json")));
        assert_eq!(args.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_config_subcommand() {
        let args = parse(&["filterq", "config", "--show"]);
        assert!(matches!(
            args.command,
            Some(Commands::Config {
                show: true,
                validate: false
            })
        ));
    }

    #[test]
    fn test_apply_args_to_config() {
        let args = parse(&[
            "filterq",
            "-s",
            "shop.json",
            "--values",
            "values.json",
            "--format",
            "JSON",
            "--no-color",
            "-v",
        ]);
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);

        assert_eq!(config.schema.path, Some(PathBuf::from("shop.json")));
        assert_eq!(config.schema.values, Some(PathBuf::from("values.json")));
        assert_eq!(config.display.format, OutputFormat::Json);
        assert!(!config.display.color_output);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_logging_flag_priority() {
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &parse(&["filterq", "-q", "--vv"]));
        assert_eq!(config.logging.level, LogLevel::Trace);

        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &parse(&["filterq", "-q"]));
        assert_eq!(config.logging.level, LogLevel::Error);
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(CliInterface::parse_output_format("plain"), OutputFormat::Plain);
        assert_eq!(CliInterface::parse_output_format("Json"), OutputFormat::Json);
        assert_eq!(CliInterface::parse_output_format("table"), OutputFormat::Plain);
    }

    #[test]
    fn test_missing_schema_is_an_error() {
        let cli = CliInterface {
            args: parse(&["filterq"]),
            config: Config::default(),
        };
        assert!(matches!(cli.load_schema(), Err(FilterqError::Generic(_))));
    }
}
