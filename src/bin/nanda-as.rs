use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use nanda_rs::listing::{write_binary, write_listing};
use nanda_rs::operand::parse_int;
use nanda_rs::{AsmConfig, Assembler, LineError};

#[derive(Parser, Debug)]
#[command(author, version, about = "Assembler for the Nanda Devi CPU")]
struct Opts {
    /// Assembly source (one instruction or label per line)
    #[arg(value_name = "SOURCE")]
    input: PathBuf,
    /// Output file (default: SOURCE.hex)
    #[arg(value_name = "DEST")]
    output: Option<PathBuf>,
    /// Address of the first instruction (dec, 0x hex or 0b binary)
    #[arg(long, default_value = "0", value_parser = parse_addr)]
    origin: u32,
    #[arg(long, value_enum, default_value_t = OutputFormat::Hex)]
    format: OutputFormat,
    /// Report every failing line instead of stopping at the first
    #[arg(long)]
    keep_going: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Listing: opcode, address and source per line
    Hex,
    /// Little-endian 32-bit words
    Bin,
    Json,
}

fn parse_addr(s: &str) -> Result<u32, String> {
    let v = parse_int(s.trim()).map_err(|e| e.to_string())?;
    u32::try_from(v).map_err(|_| format!("address out of range: {s}"))
}

fn report(err: &LineError, lines: &[&str]) {
    eprintln!("{err}");
    if let Some(src) = lines.get(err.line.wrapping_sub(1)) {
        eprintln!("  {:>4} | {}", err.line, src.trim_end());
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let text = fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;
    let lines: Vec<&str> = text.lines().collect();

    let mut asm = Assembler::new(AsmConfig { origin: opts.origin });
    let mut reported = HashSet::new();
    for (i, raw) in lines.iter().enumerate() {
        if let Err(err) = asm.add_line(i + 1, raw) {
            report(&err, &lines);
            reported.insert(err.line);
            if !opts.keep_going {
                bail!("assembly aborted");
            }
        }
    }

    let mut items = Vec::new();
    for result in asm.finish() {
        match result {
            Ok(a) => items.push(a),
            Err(err) if reported.contains(&err.line) => {}
            Err(err) => {
                report(&err, &lines);
                reported.insert(err.line);
                if !opts.keep_going {
                    bail!("assembly aborted");
                }
            }
        }
    }
    if !reported.is_empty() {
        return Err(anyhow!("{} line(s) failed to assemble", reported.len()));
    }

    let output = opts.output.clone().unwrap_or_else(|| {
        let mut p = opts.input.clone().into_os_string();
        p.push(".hex");
        PathBuf::from(p)
    });
    let bytes = match opts.format {
        OutputFormat::Hex => write_listing(&items).into_bytes(),
        OutputFormat::Bin => write_binary(&items),
        OutputFormat::Json => serde_json::to_vec_pretty(&items)?,
    };
    fs::write(&output, bytes).with_context(|| format!("writing {}", output.display()))?;
    tracing::info!(instructions = items.len(), output = %output.display(), "done");
    Ok(())
}
