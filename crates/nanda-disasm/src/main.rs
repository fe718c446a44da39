use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::path::Path;

use nanda_disasm::{load_listing, load_raw_bin, Image};
use nanda_rs::decoder::{Decoded, Decoder, Nd32Decoder};
use nanda_rs::disasm::fmt_decoded;
use nanda_rs::operand::parse_int;

#[derive(Parser, Debug)]
#[command(author, version, about = "Nanda Devi disassembler CLI", long_about = None)]
struct Cli {
    /// Input file: an assembler listing or a raw word image
    #[arg(value_name = "INPUT")]
    input: String,
    #[arg(long, value_enum, default_value_t = InputFormat::Listing)]
    input_format: InputFormat,
    /// Load address of a raw image (hex or dec)
    #[arg(long, default_value = "0")]
    base: String,
    /// Skip N bytes at start of a raw image
    #[arg(long, default_value_t = 0usize)]
    skip: usize,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Disassemble every word
    Dump {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Show raw opcode next to the address
        #[arg(long)]
        show_bytes: bool,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },
    /// Disassemble words with addresses in [start, end)
    Range {
        start: String,
        end: String,
        #[arg(long)]
        show_bytes: bool,
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputFormat {
    Listing,
    Bin,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, serde::Serialize)]
struct InsnOut {
    addr: u32,
    raw: u32,
    text: String,
    decoded: Option<Decoded>,
}

fn parse_u32(s: &str) -> Result<u32> {
    let v = parse_int(s.trim())?;
    Ok(u32::try_from(v)?)
}

fn render(img: &Image, range: Option<(u32, u32)>, show_bytes: bool) -> String {
    let dec = Nd32Decoder::new();
    let mut buf = String::new();
    for w in &img.words {
        if let Some((start, end)) = range {
            if w.addr < start || w.addr >= end {
                continue;
            }
        }
        let text = match dec.decode(w.raw) {
            Some(d) => fmt_decoded(&d),
            None => format!(".word {:#010x}", w.raw),
        };
        if show_bytes {
            let _ = writeln!(buf, "{:#010x}: {:08x}  {text}", w.addr, w.raw);
        } else {
            let _ = writeln!(buf, "{:#010x}: {text}", w.addr);
        }
    }
    buf
}

fn emit(buf: String, out: Option<String>) -> Result<()> {
    match out {
        Some(path) => std::fs::write(path, buf)?,
        None => print!("{buf}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = Path::new(&cli.input);
    let img = match cli.input_format {
        InputFormat::Listing => load_listing(path)?,
        InputFormat::Bin => load_raw_bin(path, parse_u32(&cli.base)?, cli.skip)?,
    };

    match cli.cmd {
        Command::Dump { format: OutputFormat::Text, show_bytes, out } => {
            emit(render(&img, None, show_bytes), out)?;
        }
        Command::Dump { format: OutputFormat::Json, out, .. } => {
            let dec = Nd32Decoder::new();
            let insns: Vec<InsnOut> = img
                .words
                .iter()
                .map(|w| {
                    let decoded = dec.decode(w.raw);
                    let text = decoded
                        .as_ref()
                        .map(fmt_decoded)
                        .unwrap_or_else(|| format!(".word {:#010x}", w.raw));
                    InsnOut { addr: w.addr, raw: w.raw, text, decoded }
                })
                .collect();
            emit(serde_json::to_string_pretty(&insns)?, out)?;
        }
        Command::Range { start, end, show_bytes, out } => {
            let start = parse_u32(&start)?;
            let end = parse_u32(&end)?;
            anyhow::ensure!(end >= start, "end must be >= start");
            emit(render(&img, Some((start, end)), show_bytes), out)?;
        }
    }
    Ok(())
}
