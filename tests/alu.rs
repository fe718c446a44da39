use nanda_rs::encoder::Group;
use nanda_rs::isa::alu::AluOp;
use nanda_rs::{assemble, AsmError};
use pretty_assertions::assert_eq;

fn enc(src: &str) -> u32 {
    assemble(src).unwrap()[0].opcode
}

fn err(src: &str) -> AsmError {
    assemble(src).unwrap_err().kind
}

#[test]
fn binary_field_order() {
    // [00001][0000000][op][src1][src0][dest]
    assert_eq!(enc("add r0, r1, r2"), 0x0800_0820);
    assert_eq!(enc("sub r3, r4, r5"), 0x0800_9483);
    assert_eq!(enc("add drop, pc, sp"), 0x0800_461f);
}

#[test]
fn test_writes_to_discard_sink() {
    let raw = enc("tst r3");
    assert_eq!(raw, 0x0805_007f);
    assert_eq!(raw & 0x1f, 0b11111);
    assert_eq!(enc("test r3"), raw);
}

#[test]
fn not_forms() {
    assert_eq!(enc("not r1, r2"), 0x0803_8041);
    // In-place form reads and writes the same register.
    assert_eq!(enc("not r1"), 0x0803_8021);
}

#[test]
fn every_op_lands_in_the_alu_group() {
    for op in AluOp::ALL {
        let src = match op {
            AluOp::Tst => "tst r1".to_string(),
            AluOp::Not => "not r1, r2".to_string(),
            _ => format!("{} r1, r2, r3", op.mnemonic()),
        };
        let raw = enc(&src);
        assert_eq!(Group::of(raw), Some(Group::Alu), "{src}");
        assert_eq!((raw >> 15) & 0x1f, op.code(), "{src}");
    }
}

#[test]
fn wrong_operands() {
    for src in ["add r0, r1", "tst r1, r2", "add r0, r1, 5", "not", "or r0, r1, r2, r3"] {
        assert!(
            matches!(err(src), AsmError::ArityMismatch { .. }),
            "{src} should be rejected"
        );
    }
}

#[test]
fn register_range() {
    assert_eq!(err("add r16, r0, r0"), AsmError::InvalidRegister("r16".into()));
}
