use nanda_rs::operand::{decode_operand, Operand, Resolution};
use nanda_rs::symbols::SymbolTable;
use nanda_rs::{AsmError, Reg};
use pretty_assertions::assert_eq;

fn decode(tok: &str) -> Result<Resolution, AsmError> {
    let mut syms = SymbolTable::new();
    syms.declare("@known", 0x40, 1).unwrap();
    decode_operand(tok, &syms)
}

fn reg(tok: &str) -> Reg {
    match decode(tok).unwrap() {
        Resolution::Resolved(Operand::Reg(r)) => r,
        other => panic!("{tok}: expected register, got {other:?}"),
    }
}

#[test]
fn general_purpose_registers() {
    for n in 0..16u8 {
        let r = reg(&format!("r{n}"));
        assert_eq!(r, Reg::gpr(n).unwrap());
        assert_eq!(r.code(), u32::from(n));
    }
    for bad in ["r16", "r99", "r", "rx", "r-1", "r99999999999"] {
        assert_eq!(decode(bad), Err(AsmError::InvalidRegister(bad.into())));
    }
}

#[test]
fn special_registers() {
    assert_eq!(reg("pc").code(), 0b10000);
    assert_eq!(reg("sp").code(), 0b10001);
    assert_eq!(reg("flags").code(), 0b10010);
    assert_eq!(reg("drop").code(), 0b11111);
}

#[test]
fn integers() {
    let imm = |t: &str| decode(t).unwrap();
    assert_eq!(imm("42"), Resolution::Resolved(Operand::Imm(42)));
    assert_eq!(imm("-7"), Resolution::Resolved(Operand::Imm(-7)));
    assert_eq!(imm("0x1F"), Resolution::Resolved(Operand::Imm(31)));
    assert_eq!(imm("-0b11"), Resolution::Resolved(Operand::Imm(-3)));
    assert_eq!(decode("0xZZ"), Err(AsmError::InvalidOperand("0xZZ".into())));
    assert_eq!(decode("12ab"), Err(AsmError::InvalidOperand("12ab".into())));
}

#[test]
fn labels() {
    assert_eq!(decode("@known"), Ok(Resolution::Resolved(Operand::Imm(0x40))));
    assert_eq!(decode("@later"), Ok(Resolution::Unresolved("@later".into())));
}

#[test]
fn unknown_tokens() {
    for bad in ["foo", "@", "-x", "#5", "PC"] {
        assert_eq!(decode(bad), Err(AsmError::UnknownOperand(bad.into())), "{bad}");
    }
}
