//! Register moves and memory copies.
//!
//! `[group:5][0:10][sub:2][a:5][b:5][c:5]`
//!
//! | form           | sub  | a    | b     | c       |
//! |----------------|------|------|-------|---------|
//! | `mv dest, src` | `00` | 0    | src   | dest    |
//! | `ldm dest, src`| `01` | src  | 0     | dest    |
//! | `stm dest, src`| `10` | dest | src   | `11111` |
//!
//! `ldm` reads memory at the address in `src`; `stm` writes `src` to the
//! address in `dest`.

use serde::{Deserialize, Serialize};

use crate::decoder::Decoded;
use crate::encoder::{bits_at, regs, Group, OpcodeBits, REG_BITS};
use crate::error::{AsmError, Result};
use crate::operand::Operand;
use crate::reg::Reg;

pub const MNEMONICS: &[&str] = &["mv", "ldm", "stm"];

const SUB_BITS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOp {
    Mv,
    /// Load from memory.
    Ldm,
    /// Store to memory.
    Stm,
}

impl MoveOp {
    pub const ALL: [MoveOp; 3] = [MoveOp::Mv, MoveOp::Ldm, MoveOp::Stm];

    pub fn code(self) -> u32 {
        match self {
            MoveOp::Mv => 0b00,
            MoveOp::Ldm => 0b01,
            MoveOp::Stm => 0b10,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            MoveOp::Mv => "mv",
            MoveOp::Ldm => "ldm",
            MoveOp::Stm => "stm",
        }
    }

    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.mnemonic() == mnemonic)
    }

    fn syntax(self) -> &'static str {
        match self {
            MoveOp::Mv => "mv dest, src",
            MoveOp::Ldm => "ldm dest, addr",
            MoveOp::Stm => "stm addr, src",
        }
    }
}

pub fn encode(mnemonic: &str, ops: &[Operand]) -> Result<u32> {
    let op = MoveOp::from_mnemonic(mnemonic)
        .ok_or_else(|| AsmError::UnknownMnemonic(mnemonic.to_string()))?;
    let [dest, src] = regs::<2>(mnemonic, op.syntax(), ops)?;
    let bits = OpcodeBits::new(Group::MoveCopy)
        .zeros(10)
        .field(op.code(), SUB_BITS);
    let bits = match op {
        MoveOp::Mv => bits.zeros(REG_BITS).reg(src).reg(dest),
        MoveOp::Ldm => bits.reg(src).zeros(REG_BITS).reg(dest),
        MoveOp::Stm => bits.reg(dest).reg(src).ones(REG_BITS),
    };
    Ok(bits.finish())
}

pub fn decode(raw: u32) -> Option<Decoded> {
    if bits_at(raw, 5, 10) != 0 {
        return None;
    }
    let a = bits_at(raw, 17, REG_BITS);
    let b = bits_at(raw, 22, REG_BITS);
    let c = bits_at(raw, 27, REG_BITS);
    let (op, dest, src) = match bits_at(raw, 15, SUB_BITS) {
        0b00 if a == 0 => (MoveOp::Mv, c, b),
        0b01 if b == 0 => (MoveOp::Ldm, c, a),
        0b10 if c == 0b11111 => (MoveOp::Stm, a, b),
        _ => return None,
    };
    Some(Decoded::Move {
        op,
        dest: Reg::from_code(dest)?,
        src: Reg::from_code(src)?,
    })
}
