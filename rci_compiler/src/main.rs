use clap::Parser;
use rci_compiler::config::runtime::{parse_positive, LogLevel, RuntimeConfig};
use rci_compiler::file_processor::FileProcessor;
use rci_compiler::model::{ItemCategory, TableType};
use rci_compiler::{logging, pipeline, PipelineResult};
use std::path::PathBuf;
use std::process::ExitCode;

fn positive(value: &str) -> Result<usize, String> {
    parse_positive(value).ok_or_else(|| format!("expected a positive integer, got '{}'", value))
}

/// Parse and validate an RCI device configuration file
#[derive(Debug, Parser)]
#[command(name = "rci_compiler", version, about)]
struct Cli {
    /// Configuration file to process
    file: PathBuf,

    /// Maximum length of element, collection and value names
    #[arg(long, value_parser = positive)]
    max_name_length: Option<usize>,

    /// Maximum key length for dynamic dictionaries
    #[arg(long, value_parser = positive)]
    max_key_length: Option<usize>,

    /// Maximum length of descriptor attribute values
    #[arg(long, value_parser = positive)]
    max_attribute_length: Option<usize>,

    /// Runtime configuration in TOML
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the validated configuration as JSON
    #[arg(long)]
    json: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Emit log events as JSON lines
    #[arg(long)]
    structured_logs: bool,
}

fn load_config(cli: &Cli) -> Result<RuntimeConfig, String> {
    let mut config = match &cli.config {
        Some(path) => RuntimeConfig::from_toml_file(path).map_err(|e| e.to_string())?,
        None => RuntimeConfig::default(),
    };

    if let Some(length) = cli.max_name_length {
        config.limits = config.limits.with_max_name_length(length);
    }
    if let Some(length) = cli.max_key_length {
        config.limits = config.limits.with_max_dynamic_key_length(length);
    }
    if let Some(length) = cli.max_attribute_length {
        config.limits = config.limits.with_max_attribute_length(length);
    }

    if cli.verbose {
        config.logging.enable_console_logging = true;
        config.logging.min_log_level = config.logging.min_log_level.max(LogLevel::Info);
    }
    if cli.structured_logs {
        config.logging.enable_console_logging = true;
        config.logging.use_structured_logging = true;
    }

    Ok(config)
}

fn print_summary(result: &PipelineResult) {
    let session = &result.session;
    let statistics = session.statistics();

    println!("Processed {}", result.source_name);
    println!(
        "  Groups: {} setting, {} state",
        session.table(TableType::Setting).len(),
        session.table(TableType::State).len()
    );
    println!("  Max list depth: {}", statistics.max_list_depth());
    println!(
        "  Longest names: {} collection, {} element, {} value",
        statistics.max_name_length(ItemCategory::Collections),
        statistics.max_name_length(ItemCategory::Elements),
        statistics.max_name_length(ItemCategory::Values)
    );
    let types: Vec<&str> = statistics.types_seen().iter().map(|t| t.as_str()).collect();
    println!("  Types: {}", types.join(", "));
    println!(
        "  Duration: {:.2} ms",
        result.processing_duration.as_secs_f64() * 1000.0
    );
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let file = cli.file.display().to_string();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Error: {}", message);
            return ExitCode::FAILURE;
        }
    };

    if config.logging.enable_console_logging {
        let started = logging::config::init_runtime_preferences(config.logging.clone())
            .and_then(|_| logging::init_global_logging());
        if let Err(message) = started {
            eprintln!("Warning: logging disabled: {}", message);
        }
    }

    let processor = FileProcessor::from_preferences(&config.file_processor);
    let result = match pipeline::process_file_with(&processor, &file, config.limits) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("{}", error.diagnostic(&file));
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match result.to_json() {
            Ok(json) => println!("{}", json),
            Err(error) => {
                eprintln!("Error: failed to serialize configuration: {}", error);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_summary(&result);
    }

    ExitCode::SUCCESS
}
