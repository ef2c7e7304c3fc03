use anyhow::Context;
use arthur_cli::config::{self, ConfigMerger};
use arthur_core::adapters::{FsWritePort, JsonSerializer};
use arthur_core::{GenerateError, GenerateSettings, run_generate};
use arthur_domain::{builtin_extension_names, builtin_extensions};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "arthur",
    version,
    about = "Generates GraalVM native-image configuration from a class index."
)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the built-in extensions and write the native-image artifacts.
    Generate(GenerateArgs),
    /// List the built-in extensions in execution order.
    ListExtensions(ListExtensionsArgs),
}

#[derive(Debug, Parser)]
struct GenerateArgs {
    /// Class index: a JSON file or a directory of JSON fragments.
    #[arg(long)]
    index: Utf8PathBuf,

    /// Directory receiving the *.arthur.json artifacts.
    #[arg(long, default_value = "target/arthur")]
    work_dir: Utf8PathBuf,

    /// Config file (default: ./arthur.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Extension property as key=value; overrides arthur.toml.
    #[arg(long = "property", value_name = "KEY=VALUE")]
    properties: Vec<String>,

    /// What to print once artifacts are written.
    #[arg(long, value_enum, default_value = "json")]
    format: GenerateFormat,

    /// Write compact JSON instead of pretty-printed.
    #[arg(long, default_value_t = false)]
    compact: bool,
}

#[derive(Debug, Parser)]
struct ListExtensionsArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: ListFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum GenerateFormat {
    /// The native-image output configuration as JSON.
    Json,
    /// native-image arguments, one per line.
    Args,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ListFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main(cli) {
        error!("{:?}", e);
        let code = e
            .downcast_ref::<GenerateError>()
            .map(GenerateError::exit_code)
            .unwrap_or(1);
        return ExitCode::from(code);
    }
    ExitCode::from(0)
}

fn real_main(cli: Cli) -> anyhow::Result<()> {
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::ListExtensions(args) => cmd_list_extensions(args),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let file_config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(Utf8Path::new("."))
            .context("load arthur.toml config")?,
    };
    let cli_properties = config::parse_cli_params(&args.properties)?;
    let merged = ConfigMerger::new(file_config).merge_generate_args(&cli_properties);

    debug!(
        "merged config: properties={:?}, static registrations={}",
        merged.properties,
        !merged.registrations.is_empty()
    );

    let pool = arthur_index::load_index(&args.index)
        .with_context(|| format!("load class index from {}", args.index))?;
    let pool = Arc::new(pool);

    let settings = GenerateSettings {
        work_dir: args.work_dir,
        properties: merged.properties,
        pretty: !args.compact,
    };

    let configuration = run_generate(
        &settings,
        builtin_extensions(merged.registrations),
        pool.clone(),
        pool,
        &FsWritePort,
        &JsonSerializer::new(settings.pretty),
    )?;

    match args.format {
        GenerateFormat::Json => {
            let json = if settings.pretty {
                serde_json::to_string_pretty(&configuration)?
            } else {
                serde_json::to_string(&configuration)?
            };
            println!("{}", json);
        }
        GenerateFormat::Args => {
            for arg in configuration.native_image_args() {
                println!("{}", arg);
            }
        }
    }
    Ok(())
}

fn cmd_list_extensions(args: ListExtensionsArgs) -> anyhow::Result<()> {
    let names = builtin_extension_names();
    match args.format {
        ListFormat::Text => {
            for name in names {
                println!("{}", name);
            }
        }
        ListFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&names)?);
        }
    }
    Ok(())
}
