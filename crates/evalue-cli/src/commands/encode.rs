//! Value encoding command
//!
//! Values are written as `kind:literal`, for example `int:42`,
//! `double:0.5`, `bool:true`, `string:hello`, `none`, or a tensor as
//! `f32[2,2]:1,2,3,4`.

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use clap::{Args, ValueEnum};
use evalue_core::{encode_values, Tensor, Value};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Hexadecimal string
    Hex,
    /// Base64 string
    Base64,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Values to encode (`int:42`, `string:hi`, `f32[3]:1,2,3`, `none`, ...)
    #[arg(required = true)]
    pub values: Vec<String>,

    /// Wrap the value(s) in a length-prefixed sequence (implied by several values)
    #[arg(long)]
    pub framed: bool,

    /// Output format when printing to stdout
    #[arg(short = 'f', long, default_value = "hex")]
    pub output_format: OutputFormat,

    /// Write raw bytes to this file instead of printing
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: EncodeArgs) -> Result<()> {
    let values = args
        .values
        .iter()
        .map(|s| parse_value(s).with_context(|| format!("Invalid input: {}", s)))
        .collect::<Result<Vec<_>>>()?;

    let bytes = if args.framed || values.len() > 1 {
        encode_values(&values)?
    } else {
        values[0].encode()?
    };
    debug!(count = values.len(), len = bytes.len(), "encoded");

    match args.output {
        Some(path) => fs::write(&path, &bytes)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?,
        None => match args.output_format {
            OutputFormat::Hex => println!("{}", hex::encode(&bytes)),
            OutputFormat::Base64 => println!("{}", BASE64.encode(&bytes)),
        },
    }
    Ok(())
}

/// Parses a `kind:literal` value description.
pub fn parse_value(input: &str) -> Result<Value> {
    let (kind, literal) = match input.split_once(':') {
        Some((kind, literal)) => (kind, Some(literal)),
        None => (input, None),
    };

    let need = || literal.with_context(|| format!("`{}` requires a literal, e.g. {}:...", kind, kind));

    let value = match kind {
        "none" => Value::none(),
        "bool" => Value::from_bool(need()?.parse().context("expected true or false")?),
        "int" => Value::from_int(need()?.parse().context("expected a 64-bit integer")?),
        "double" => Value::from_double(need()?.parse().context("expected a number")?),
        "string" | "str" => Value::from_string(literal.unwrap_or_default()),
        tensor if tensor.contains('[') => Value::from_tensor(parse_tensor(tensor, need()?)?),
        other => bail!("unknown value kind `{}`", other),
    };
    Ok(value)
}

/// Parses `dtype[d0,d1,...]` plus comma-separated elements.
fn parse_tensor(head: &str, elements: &str) -> Result<Tensor> {
    let (dtype, rest) = head
        .split_once('[')
        .context("tensor shape must be written as dtype[dims]")?;
    let dims = rest
        .strip_suffix(']')
        .context("tensor shape is missing `]`")?;

    let shape = split_list(dims)
        .map(|d| d.parse::<usize>().with_context(|| format!("bad dimension `{}`", d)))
        .collect::<Result<Vec<_>>>()?;

    let tensor = match dtype {
        "f32" => Tensor::from_slice(shape, &parse_elements::<f32>(elements)?),
        "f64" => Tensor::from_slice(shape, &parse_elements::<f64>(elements)?),
        "i32" => Tensor::from_slice(shape, &parse_elements::<i32>(elements)?),
        "i64" => Tensor::from_slice(shape, &parse_elements::<i64>(elements)?),
        "bool" => Tensor::from_slice(shape, &parse_elements::<bool>(elements)?),
        other => bail!("unsupported tensor dtype `{}`", other),
    };
    Ok(tensor?)
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_elements<T>(elements: &str) -> Result<Vec<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    split_list(elements)
        .map(|e| e.parse::<T>().with_context(|| format!("bad element `{}`", e)))
        .collect()
}
