use crate::assembler::Assembled;

/// `{opcode:08x} {address:04x} {source}`
pub fn format_line(a: &Assembled) -> String {
    format!("{:08x} {:04x} {}", a.opcode, a.address, a.text.trim())
}

pub fn write_listing(items: &[Assembled]) -> String {
    let mut out = String::new();
    for a in items {
        out.push_str(&format_line(a));
        out.push('\n');
    }
    out
}

/// Opcodes as little-endian words, in source order.
pub fn write_binary(items: &[Assembled]) -> Vec<u8> {
    items.iter().flat_map(|a| a.opcode.to_le_bytes()).collect()
}
