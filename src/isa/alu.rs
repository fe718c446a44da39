//! Register-to-register arithmetic and logic.
//!
//! Binary: `[group:5][0:7][op:5][src1:5][src0:5][dest:5]`
//! Unary:  `[group:5][0:7][op:5][0:5][src0:5][dest:5]`, where `tst` always
//! writes to the discard sink.

use serde::{Deserialize, Serialize};

use crate::decoder::Decoded;
use crate::encoder::{bits_at, regs, Group, OpcodeBits, REG_BITS};
use crate::error::{AsmError, Result};
use crate::operand::Operand;
use crate::reg::Reg;

pub const MNEMONICS: &[&str] = &[
    "add", "sub", "addc", "subc", "or", "xor", "and", "not", "sll", "slr", "tst", "test",
];

const OP_BITS: usize = 5;

const BINARY_SYNTAX: &str = "op dest, src0, src1";
const NOT_SYNTAX: &str = "not dest, src | not reg";
const TST_SYNTAX: &str = "tst src";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AluOp {
    Add,
    Sub,
    /// Add with carry.
    Addc,
    /// Subtract with borrow.
    Subc,
    Or,
    Xor,
    And,
    Not,
    /// Shift left logical.
    Sll,
    /// Shift right logical.
    Slr,
    /// Sets flags from its source and discards the result.
    Tst,
}

impl AluOp {
    pub const ALL: [AluOp; 11] = [
        AluOp::Add,
        AluOp::Sub,
        AluOp::Addc,
        AluOp::Subc,
        AluOp::Or,
        AluOp::Xor,
        AluOp::And,
        AluOp::Not,
        AluOp::Sll,
        AluOp::Slr,
        AluOp::Tst,
    ];

    pub fn code(self) -> u32 {
        match self {
            AluOp::Add => 0b00000,
            AluOp::Sub => 0b00001,
            AluOp::Addc => 0b00010,
            AluOp::Subc => 0b00011,
            AluOp::Or => 0b00100,
            AluOp::Xor => 0b00101,
            AluOp::And => 0b00110,
            AluOp::Not => 0b00111,
            AluOp::Sll => 0b01000,
            AluOp::Slr => 0b01001,
            AluOp::Tst => 0b01010,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.code() == code)
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "add",
            AluOp::Sub => "sub",
            AluOp::Addc => "addc",
            AluOp::Subc => "subc",
            AluOp::Or => "or",
            AluOp::Xor => "xor",
            AluOp::And => "and",
            AluOp::Not => "not",
            AluOp::Sll => "sll",
            AluOp::Slr => "slr",
            AluOp::Tst => "tst",
        }
    }

    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        if mnemonic == "test" {
            return Some(AluOp::Tst);
        }
        Self::ALL.into_iter().find(|op| op.mnemonic() == mnemonic)
    }

    pub fn is_unary(self) -> bool {
        matches!(self, AluOp::Not | AluOp::Tst)
    }
}

pub fn encode(mnemonic: &str, ops: &[Operand]) -> Result<u32> {
    let op = AluOp::from_mnemonic(mnemonic)
        .ok_or_else(|| AsmError::UnknownMnemonic(mnemonic.to_string()))?;
    let (dest, src0, src1) = match op {
        AluOp::Tst => {
            let [src] = regs::<1>(mnemonic, TST_SYNTAX, ops)?;
            (Reg::Drop, src, None)
        }
        AluOp::Not if ops.len() == 1 => {
            let [reg] = regs::<1>(mnemonic, NOT_SYNTAX, ops)?;
            (reg, reg, None)
        }
        AluOp::Not => {
            let [dest, src] = regs::<2>(mnemonic, NOT_SYNTAX, ops)?;
            (dest, src, None)
        }
        _ => {
            let [dest, src0, src1] = regs::<3>(mnemonic, BINARY_SYNTAX, ops)?;
            (dest, src0, Some(src1))
        }
    };
    Ok(OpcodeBits::new(Group::Alu)
        .zeros(7)
        .field(op.code(), OP_BITS)
        .field(src1.map_or(0, Reg::code), REG_BITS)
        .reg(src0)
        .reg(dest)
        .finish())
}

pub fn decode(raw: u32) -> Option<Decoded> {
    if bits_at(raw, 5, 7) != 0 {
        return None;
    }
    let op = AluOp::from_code(bits_at(raw, 12, OP_BITS))?;
    let src1 = bits_at(raw, 17, REG_BITS);
    let src0 = Reg::from_code(bits_at(raw, 22, REG_BITS))?;
    let dest = Reg::from_code(bits_at(raw, 27, REG_BITS))?;
    if op.is_unary() {
        if src1 != 0 || (op == AluOp::Tst && dest != Reg::Drop) {
            return None;
        }
        return Some(Decoded::Alu { op, dest, src0, src1: None });
    }
    Some(Decoded::Alu {
        op,
        dest,
        src0,
        src1: Some(Reg::from_code(src1)?),
    })
}
