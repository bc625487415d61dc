//! Keyword Automaton - command-line driver.
//!
//! Loads configuration, initializes logging and drives the library:
//! scanning text for keywords, exporting the trie graph, validating or
//! generating configuration files.

use clap::{Parser, Subcommand, ValueEnum};
use keyword_automaton_lib::config::{self, AppConfig, LogConfig};
use keyword_automaton_lib::data_structures::aho_corasick::Automaton;
use keyword_automaton_lib::error::{
    AppError, AppResult, ErrorContext, ErrorReporter, TracingErrorReporter,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for the keyword automaton.
#[derive(Parser, Debug)]
#[clap(name = "Keyword Automaton", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Keyword sources shared by the commands that build an automaton.
#[derive(clap::Args, Debug)]
struct KeywordArgs {
    /// Keyword to search for (repeatable)
    #[clap(short, long = "keyword")]
    keywords: Vec<String>,

    /// File with one keyword per line
    #[clap(long, value_parser)]
    keywords_file: Option<PathBuf>,
}

/// Output format of the `graph` command.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum GraphFormat {
    Dot,
    Json,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Report every keyword occurrence in a text
    Scan {
        #[clap(flatten)]
        keywords: KeywordArgs,

        /// Text to scan
        #[clap(short, long, conflicts_with = "input", required_unless_present = "input")]
        text: Option<String>,

        /// File to scan
        #[clap(short, long, value_parser)]
        input: Option<PathBuf>,

        /// Print matches as JSON
        #[clap(long)]
        json: bool,
    },

    /// Export the trie and its failure links
    Graph {
        #[clap(flatten)]
        keywords: KeywordArgs,

        /// Output format
        #[clap(short, long, value_enum, default_value = "dot")]
        format: GraphFormat,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// so that command output on stdout stays machine readable.
fn init_logging(log: &LogConfig) -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| AppError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Collects keywords from the command line and the optional keywords file.
fn collect_keywords(args: &KeywordArgs) -> AppResult<Vec<String>> {
    let mut keywords = args.keywords.clone();
    if let Some(path) = &args.keywords_file {
        let contents = std::fs::read_to_string(path)?;
        keywords.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }

    if keywords.is_empty() {
        return Err(AppError::Custom(
            "No keywords given; use --keyword or --keywords-file".to_string(),
        ));
    }
    Ok(keywords)
}

/// Builds an automaton over the collected keywords.
fn build_automaton(config: &AppConfig, args: &KeywordArgs) -> AppResult<Automaton> {
    let keywords = collect_keywords(args)?;
    let mut automaton = Automaton::with_options(config.automaton.to_options());
    for keyword in &keywords {
        automaton.insert(keyword)?;
    }

    let stats = automaton.build();
    info!(
        keywords = stats.keywords,
        nodes = stats.nodes,
        max_depth = stats.max_depth,
        "Automaton built"
    );
    Ok(automaton)
}

fn scan(
    config: &AppConfig,
    keywords: &KeywordArgs,
    text: Option<String>,
    input: Option<&Path>,
    json: bool,
) -> AppResult<()> {
    let mut automaton = build_automaton(config, keywords)?;
    let text = match (text, input) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => return Err(AppError::Custom("Nothing to scan".to_string())),
    };

    let matches = automaton.scan(&text)?;
    info!(matches = matches.len(), "Scan finished");

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        for m in &matches {
            println!("{}\t{}\t{}", m.keyword, m.start, m.end);
        }
    }
    Ok(())
}

fn graph(config: &AppConfig, keywords: &KeywordArgs, format: GraphFormat) -> AppResult<()> {
    let automaton = build_automaton(config, keywords)?;
    let graph = automaton.graph();
    match format {
        GraphFormat::Dot => println!("{}", graph.to_dot()),
        GraphFormat::Json => println!("{}", serde_json::to_string_pretty(&graph)?),
    }
    Ok(())
}

fn gen_config(output: &Path) -> AppResult<()> {
    info!("Generating default configuration");
    let default_config = AppConfig::default();

    // Create parent directories if they don't exist
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml = toml::to_string_pretty(&default_config)
        .map_err(|e| AppError::Custom(format!("Failed to serialize config: {e}")))?;
    std::fs::write(output, toml)?;

    info!("Default configuration written to {:?}", output);
    Ok(())
}

fn run(command: Command, config: &AppConfig) -> AppResult<()> {
    match command {
        Command::Scan {
            keywords,
            text,
            input,
            json,
        } => scan(config, &keywords, text, input.as_deref(), json),
        Command::Graph { keywords, format } => graph(config, &keywords, format),
        Command::Validate => {
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { output } => gen_config(&output),
    }
}

/// Logs the error through the reporter and exits non-zero.
fn fail(reporter: &dyn ErrorReporter, error: AppError, component: &str) -> ! {
    eprintln!("error: {error}");
    reporter.report(ErrorContext::new(error, component));
    process::exit(1);
}

/// Main entry point for the application.
fn main() {
    let args = Args::parse();
    let reporter = TracingErrorReporter;

    let config = match keyword_automaton_lib::init(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            // Logging falls back to defaults so the failure is still reported
            let _ = init_logging(&LogConfig::default());
            fail(&reporter, e, "config");
        }
    };

    if let Err(e) = init_logging(&config.log) {
        eprintln!("error: {e}");
        process::exit(1);
    }
    info!(version = keyword_automaton_lib::VERSION, prefix = config::ENV_PREFIX, "Starting");

    if let Err(e) = run(args.command, &config) {
        fail(&reporter, e, "cli");
    }
}
