use nanda_rs::{assemble, AsmError};
use pretty_assertions::assert_eq;

fn enc(src: &str) -> u32 {
    assemble(src).unwrap()[0].opcode
}

#[test]
fn move_forms() {
    // [00010][0 x10][sub:2][a][b][c]
    assert_eq!(enc("mv r1, r2"), 0x1000_0041);
    assert_eq!(enc("ldm r1, r2"), 0x1000_8801);
    assert_eq!(enc("stm r1, r2"), 0x1001_045f);
}

#[test]
fn store_pads_with_ones() {
    assert_eq!(enc("stm r0, r0") & 0x1f, 0b11111);
    assert_eq!(enc("ldm r0, r0") & 0x1f, 0);
}

#[test]
fn registers_only() {
    let err = assemble("mv r1, 5").unwrap_err();
    assert_eq!(err.line, 1);
    assert!(matches!(err.kind, AsmError::ArityMismatch { ref mnemonic, .. } if mnemonic == "mv"));
}
