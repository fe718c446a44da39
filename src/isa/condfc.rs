//! Conditional skips: `scs`, `scc`, `szs`, `szc`, `sns`, `snc`.
//!
//! `[group:5][0:18][cond:4][11111]`

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::decoder::Decoded;
use crate::encoder::{bits_at, Group, OpcodeBits};
use crate::error::{AsmError, Result};
use crate::operand::Operand;

pub const MNEMONICS: &[&str] = &["scs", "scc", "szs", "szc", "sns", "snc"];

const COND_BITS: usize = 4;

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cond: u8 {
const CARRY = 0b0001;
const ZERO = 0b0010;
const NEGATIVE = 0b0100;
const CLEAR = 0b1000; // skip when the flag is clear instead of set
}
}

const TABLE: &[(&str, Cond)] = &[
    ("scs", Cond::CARRY),
    ("scc", Cond::CARRY.union(Cond::CLEAR)),
    ("szs", Cond::ZERO),
    ("szc", Cond::ZERO.union(Cond::CLEAR)),
    ("sns", Cond::NEGATIVE),
    ("snc", Cond::NEGATIVE.union(Cond::CLEAR)),
];

impl Cond {
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        TABLE.iter().find(|(m, _)| *m == mnemonic).map(|(_, c)| *c)
    }

    /// `None` for bit patterns no skip mnemonic produces.
    pub fn mnemonic(self) -> Option<&'static str> {
        TABLE.iter().find(|(_, c)| *c == self).map(|(m, _)| *m)
    }
}

pub fn encode(mnemonic: &str, ops: &[Operand]) -> Result<u32> {
    let cond = Cond::from_mnemonic(mnemonic)
        .ok_or_else(|| AsmError::UnknownMnemonic(mnemonic.to_string()))?;
    if !ops.is_empty() {
        return Err(AsmError::ArityMismatch {
            mnemonic: mnemonic.to_string(),
            syntax: "no operands",
        });
    }
    Ok(OpcodeBits::new(Group::CondFlow)
        .zeros(18)
        .field(u32::from(cond.bits()), COND_BITS)
        .ones(5)
        .finish())
}

pub fn decode(raw: u32) -> Option<Decoded> {
    if bits_at(raw, 5, 18) != 0 || bits_at(raw, 27, 5) != 0b11111 {
        return None;
    }
    let cond = Cond::from_bits(bits_at(raw, 23, COND_BITS) as u8)?;
    cond.mnemonic()?;
    Some(Decoded::Skip { cond })
}
