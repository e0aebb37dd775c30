//! Courier - JSON payload conversion from the command line
//!
//! Reads a payload, decodes it through the JSON message converter and
//! writes it back out with the configured prefix and formatting.

use anyhow::Context;
use clap::{Parser, Subcommand};
use courier_converter::{JsonMessageConverter, MessageConverter};
use courier_core::config::{ConfigLoader, LogFormat, LoggingConfig};
use courier_core::MediaType;
use serde_json::Value;
use std::io::{Read, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "courier")]
#[command(author, version = courier_core::VERSION, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (.json or .toml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a payload and write it back as JSON
    Convert {
        /// Input file, stdin when omitted or "-"
        input: Option<String>,

        /// Declared content type of the input
        #[arg(long, default_value = "application/json")]
        content_type: String,

        /// Indent the output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Never indent the output
        #[arg(long)]
        compact: bool,

        /// Prefix the output with "{} && "
        #[arg(long)]
        prefix: bool,
    },

    /// Report whether a media type can be read and written
    Supports {
        /// Media type to check, e.g. application/vnd.api+json
        media_type: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(cli.config.as_deref()).with_context(|| {
        format!(
            "Failed to load config from {}",
            cli.config.as_deref().unwrap_or_default()
        )
    })?;

    init_tracing(&config.logging, cli.verbose);

    let mut converter = JsonMessageConverter::from_options(&config.converter);

    match cli.command {
        Commands::Convert {
            input,
            content_type,
            pretty,
            compact,
            prefix,
        } => {
            if pretty {
                converter.set_pretty_print(true);
            } else if compact {
                converter.set_pretty_print(false);
            }
            if prefix {
                converter.set_prefix_json(true);
            }
            convert(&converter, input.as_deref(), &content_type)
        }

        Commands::Supports { media_type } => {
            let media_type: MediaType = media_type.parse()?;
            let read = converter.can_convert_from_payload::<Value>(Some(&media_type));
            let write = converter.can_convert_to_payload::<Value>(Some(&media_type));
            println!("read: {}", read);
            println!("write: {}", write);
            Ok(())
        }
    }
}

fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
    };

    // stdout carries the converted payload
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .init(),
    }
}

fn convert(
    converter: &JsonMessageConverter,
    input: Option<&str>,
    content_type: &str,
) -> anyhow::Result<()> {
    let content_type: MediaType = content_type.parse()?;
    if !converter.can_convert_from_payload::<Value>(Some(&content_type)) {
        anyhow::bail!("Unsupported content type: {}", content_type);
    }

    let payload = read_input(input)?;
    tracing::debug!("Read {} bytes of {}", payload.len(), content_type);

    let value: Value = converter.convert_from_payload(Some(&content_type), &payload)?;
    let mut out = converter.convert_to_payload(&value, Some(&content_type))?;
    out.push(b'\n');

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&out)?;
    stdout.flush()?;
    Ok(())
}

fn read_input(input: Option<&str>) -> anyhow::Result<Vec<u8>> {
    let mut payload = Vec::new();
    match input {
        None | Some("-") => {
            std::io::stdin().read_to_end(&mut payload)?;
        }
        Some(path) => {
            payload = std::fs::read(path).with_context(|| format!("Failed to read {}", path))?;
        }
    }
    Ok(payload)
}
