//! Buffer decoding command
//!
//! Decodes a single encoded value, or a framed sequence, and prints it.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use clap::{Args, ValueEnum};
use evalue_core::{decode_values, Value};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, ValueEnum)]
pub enum InputFormat {
    /// Hexadecimal encoded (e.g., 0400000000000000 2a)
    Hex,
    /// Base64 encoded
    Base64,
    /// Raw binary file
    File,
    /// Auto-detect based on content
    Auto,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// One line per value (default)
    Text,
    /// JSON output
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// Debug format
    Debug,
}

#[derive(Args, Debug)]
pub struct ExplainArgs {
    /// Payload to decode (hex string, base64 string, or file path depending on format)
    pub payload: String,

    /// Input format for the payload
    #[arg(short = 'i', long, default_value = "auto")]
    pub input_format: InputFormat,

    /// Output format
    #[arg(short = 'f', long, default_value = "text")]
    pub output_format: OutputFormat,

    /// Treat the payload as a length-prefixed sequence of values
    #[arg(long)]
    pub framed: bool,
}

pub fn run(args: ExplainArgs) -> Result<()> {
    let bytes = decode_payload(&args.payload, &args.input_format)?;

    let values = if args.framed {
        decode_values(&bytes).context("Failed to decode value sequence")?
    } else {
        vec![Value::decode(&bytes).context("Failed to decode value")?]
    };

    println!("{}", render(&values, &args.output_format)?);
    Ok(())
}

fn render(values: &[Value], format: &OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => values
            .iter()
            .map(|v| format!("{}: {}", v.kind(), v))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string(values)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(values)?,
        OutputFormat::Debug => format!("{:#?}", values),
    })
}

/// Decode payload bytes based on input format
fn decode_payload(payload: &str, format: &InputFormat) -> Result<Vec<u8>> {
    match format {
        InputFormat::Hex => hex::decode(payload.trim_start_matches("0x").replace(' ', ""))
            .context("Failed to decode hex payload"),
        InputFormat::Base64 => BASE64
            .decode(payload.trim())
            .context("Failed to decode base64 payload"),
        InputFormat::File => {
            fs::read(payload).with_context(|| format!("Failed to read payload file: {}", payload))
        }
        InputFormat::Auto => {
            let trimmed = payload.trim();

            if PathBuf::from(trimmed).exists() {
                return fs::read(trimmed)
                    .with_context(|| format!("Failed to read payload file: {}", trimmed));
            }

            let compact = trimmed.trim_start_matches("0x").replace(' ', "");
            if compact.chars().all(|c| c.is_ascii_hexdigit()) {
                if let Ok(bytes) = hex::decode(&compact) {
                    return Ok(bytes);
                }
            }

            if let Ok(bytes) = BASE64.decode(trimmed) {
                return Ok(bytes);
            }

            anyhow::bail!(
                "Could not auto-detect payload format. Please specify --input-format explicitly."
            )
        }
    }
}
