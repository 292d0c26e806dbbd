use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use url_hash::{fragment_of, HashDecoding, HashReader};
use url_hash_config::{Config, LoadOptions};
use url_hash_format::{render, HashRecord, OutputFormat};

/// Entry point for CLI execution. Returns the desired exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    let mut options = LoadOptions::default();
    if let Some(path) = &cli.config {
        options = options.with_override_path(path);
    }
    let config = Config::load(options)?;

    if cli.verbose {
        for layer in &config.sources.layers {
            eprintln!("config: applied {layer}");
        }
    }

    let decoding = match cli.decode {
        Some(DecodeValue::Verbatim) => HashDecoding::Verbatim,
        Some(DecodeValue::Percent) => HashDecoding::Percent,
        None => config.hash.decode,
    };
    if cli.verbose {
        eprintln!("config: decode = {decoding}");
    }
    let reader = HashReader::new(decoding);

    let inputs = collect_inputs(&cli.inputs)?;
    let records: Vec<HashRecord> = inputs
        .into_iter()
        .map(|input| resolve(&reader, input, cli.address))
        .collect();

    let format = match cli.format.unwrap_or(FormatValue::Plain) {
        FormatValue::Plain => OutputFormat::Plain,
        FormatValue::Json => OutputFormat::Json,
    };

    let rendered = render(&records, format).context("Failed to render output")?;
    emit(&rendered)?;
    Ok(0)
}

fn resolve(reader: &HashReader, input: String, is_address: bool) -> HashRecord {
    let fragment = if is_address {
        fragment_of(&input)
    } else {
        input.as_str()
    };
    let hash = reader.read(fragment).into_owned();
    let fragment = fragment.to_owned();
    HashRecord {
        input,
        fragment,
        hash,
    }
}

fn collect_inputs(args: &[String]) -> Result<Vec<String>> {
    if args.is_empty() {
        return read_stdin_lines();
    }

    let mut inputs = Vec::with_capacity(args.len());
    for arg in args {
        if arg == "-" {
            inputs.extend(read_stdin_lines()?);
        } else {
            inputs.push(arg.clone());
        }
    }
    Ok(inputs)
}

fn read_stdin_lines() -> Result<Vec<String>> {
    let stdin = io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input from stdin")?;
        // `lines()` leaves a lone `\r` on an unterminated final line.
        let line = match line.strip_suffix('\r') {
            Some(trimmed) => trimmed.to_owned(),
            None => line,
        };
        lines.push(line);
    }
    Ok(lines)
}

fn emit(content: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match handle.write_all(content.as_bytes()) {
        Ok(_) => {}
        Err(err) if should_ignore_pipe_error(&err) => return Ok(()),
        Err(err) => return Err(err).context("Failed to write output"),
    }

    match handle.flush() {
        Ok(_) => Ok(()),
        Err(err) if should_ignore_pipe_error(&err) => Ok(()),
        Err(err) => Err(err).context("Failed to flush stdout"),
    }
}

fn should_ignore_pipe_error(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::BrokenPipe | io::ErrorKind::WouldBlock
    )
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Print the hash value of browser address fragments"
)]
struct Cli {
    /// Address fragments to read; `-` or no inputs reads lines from stdin
    #[arg(value_name = "INPUT")]
    inputs: Vec<String>,
    /// Treat inputs as full addresses and read their fragment
    #[arg(short, long)]
    address: bool,
    /// Override the configured decoding policy
    #[arg(long, value_enum)]
    decode: Option<DecodeValue>,
    /// Select output format
    #[arg(long, value_enum)]
    format: Option<FormatValue>,
    /// Load an explicit config file on top of discovered ones
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Report applied configuration on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum DecodeValue {
    Verbatim,
    Percent,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatValue {
    Plain,
    Json,
}
