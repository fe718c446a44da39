use nanda_rs::encoder::Group;
use nanda_rs::{assemble, AsmError};
use pretty_assertions::assert_eq;

#[test]
fn condition_codes() {
    let cases = [
        ("scs", 0x1800_003f),
        ("scc", 0x1800_013f),
        ("szs", 0x1800_005f),
        ("szc", 0x1800_015f),
        ("sns", 0x1800_009f),
        ("snc", 0x1800_019f),
    ];
    for (src, want) in cases {
        let raw = assemble(src).unwrap()[0].opcode;
        assert_eq!(raw, want, "{src}");
        assert_eq!(Group::of(raw), Some(Group::CondFlow));
    }
}

#[test]
fn skips_take_no_operands() {
    let err = assemble("scs r0").unwrap_err();
    assert!(matches!(err.kind, AsmError::ArityMismatch { .. }));
}
