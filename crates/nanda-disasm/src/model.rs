use anyhow::{anyhow, Context, Result};
use std::path::Path;

/// One 32-bit word at its load address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word {
    pub addr: u32,
    pub raw: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Image {
    pub words: Vec<Word>,
}

/// Parses an assembler listing: `OPCODE ADDRESS [source...]` per line, hex fields.
pub fn parse_listing(text: &str) -> Result<Image> {
    let mut words = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let mut fields = line.split_whitespace();
        let Some(op) = fields.next() else { continue };
        let addr = fields
            .next()
            .ok_or_else(|| anyhow!("line {}: missing address field", idx + 1))?;
        let raw = u32::from_str_radix(op, 16).with_context(|| format!("line {}: bad opcode `{op}`", idx + 1))?;
        let addr = u32::from_str_radix(addr, 16).with_context(|| format!("line {}: bad address `{addr}`", idx + 1))?;
        words.push(Word { addr, raw });
    }
    Ok(Image { words })
}

pub fn load_listing(path: &Path) -> Result<Image> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_listing(&text)
}

/// Little-endian words laid out from `base`.
pub fn parse_raw_bin(bytes: &[u8], base: u32) -> Result<Image> {
    anyhow::ensure!(bytes.len() % 4 == 0, "image length {} is not a multiple of 4", bytes.len());
    let words = bytes
        .chunks_exact(4)
        .enumerate()
        .map(|(i, c)| Word {
            addr: base.wrapping_add((i * 4) as u32),
            raw: u32::from_le_bytes([c[0], c[1], c[2], c[3]]),
        })
        .collect();
    Ok(Image { words })
}

pub fn load_raw_bin(path: &Path, base: u32, skip: usize) -> Result<Image> {
    let file = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    anyhow::ensure!(skip <= file.len(), "--skip exceeds file size");
    parse_raw_bin(&file[skip..], base)
}

pub fn read_u32(img: &Image, addr: u32) -> Option<u32> {
    img.words.iter().find(|w| w.addr == addr).map(|w| w.raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn listing_fields_are_hex() {
        let img = parse_listing("0000002a 0000 ldi r10, 1\n\n08000820 0004 add r0, r1, r2\n").unwrap();
        assert_eq!(
            img.words,
            vec![Word { addr: 0, raw: 0x2a }, Word { addr: 4, raw: 0x0800_0820 }]
        );
        assert!(parse_listing("zz 0000").is_err());
        assert!(parse_listing("00000000").is_err());
    }

    #[test]
    fn raw_words_are_little_endian() {
        let img = parse_raw_bin(&[0x02, 0x03, 0x04, 0x05, 0xff, 0, 0, 0], 0x100).unwrap();
        assert_eq!(read_u32(&img, 0x100), Some(0x0504_0302));
        assert_eq!(read_u32(&img, 0x104), Some(0xff));
        assert_eq!(read_u32(&img, 0x108), None);
        assert!(parse_raw_bin(&[1, 2, 3], 0).is_err());
    }
}
