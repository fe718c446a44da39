use crate::decoder::Decoded;
use crate::isa::alu::AluOp;

pub fn fmt_decoded(d: &Decoded) -> String {
    match *d {
        Decoded::Ldi { dest, packed } => format!("ldi {dest}, {:#x}", packed.unpack()),
        Decoded::Alu { op: AluOp::Tst, src0, .. } => format!("tst {src0}"),
        Decoded::Alu { op, dest, src0, src1: None } => format!("{} {dest}, {src0}", op.mnemonic()),
        Decoded::Alu { op, dest, src0, src1: Some(src1) } => {
            format!("{} {dest}, {src0}, {src1}", op.mnemonic())
        }
        Decoded::Move { op, dest, src } => format!("{} {dest}, {src}", op.mnemonic()),
        Decoded::Skip { cond } => cond.mnemonic().unwrap_or("s??").to_string(),
    }
}
