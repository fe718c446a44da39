//! Instruction groups and the fixed-width field writer shared by all encoders.
//!
//! Every opcode is 32 bits, written most significant field first. The first
//! five bits select the group.

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{AsmError, Result};
use crate::isa::{alu, condfc, ldi, mvcp};
use crate::operand::Operand;
use crate::reg::Reg;

pub const OPCODE_BITS: usize = 32;
pub const GROUP_BITS: usize = 5;
pub const REG_BITS: usize = 5;

/// Signature shared by every family encoder.
pub type EncodeFn = fn(&str, &[Operand]) -> Result<u32>;

/// What a registry entry points at: the emitting family and its encode function.
#[derive(Clone, Copy)]
pub struct Encoder {
    pub group: Group,
    pub encode: EncodeFn,
}

impl std::fmt::Debug for Encoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encoder").field("group", &self.group).finish_non_exhaustive()
    }
}

/// Instruction family, tagged by its 5-bit group code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    LoadImmediate,
    Alu,
    MoveCopy,
    CondFlow,
}

impl Group {
    pub const ALL: [Group; 4] = [
        Group::LoadImmediate,
        Group::Alu,
        Group::MoveCopy,
        Group::CondFlow,
    ];

    pub fn code(self) -> u32 {
        match self {
            Group::LoadImmediate => 0b00000,
            Group::Alu => 0b00001,
            Group::MoveCopy => 0b00010,
            Group::CondFlow => 0b00011,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.code() == code)
    }

    /// Group of an encoded opcode.
    pub fn of(raw: u32) -> Option<Self> {
        Self::from_code(bits_at(raw, 0, GROUP_BITS))
    }

    /// Mnemonics this family encodes.
    pub fn mnemonics(self) -> &'static [&'static str] {
        match self {
            Group::LoadImmediate => ldi::MNEMONICS,
            Group::Alu => alu::MNEMONICS,
            Group::MoveCopy => mvcp::MNEMONICS,
            Group::CondFlow => condfc::MNEMONICS,
        }
    }

    pub fn encoder(self) -> Encoder {
        let encode: EncodeFn = match self {
            Group::LoadImmediate => ldi::encode,
            Group::Alu => alu::encode,
            Group::MoveCopy => mvcp::encode,
            Group::CondFlow => condfc::encode,
        };
        Encoder { group: self, encode }
    }
}

/// Builds an opcode field by field, MSB first.
#[derive(Debug, Clone)]
pub struct OpcodeBits {
    bits: BitVec<u32, Msb0>,
}

impl OpcodeBits {
    pub fn new(group: Group) -> Self {
        Self {
            bits: BitVec::with_capacity(OPCODE_BITS),
        }
        .field(group.code(), GROUP_BITS)
    }

    pub fn field(mut self, value: u32, width: usize) -> Self {
        assert!(
            width < OPCODE_BITS && value >> width == 0,
            "field value {value:#x} does not fit in {width} bits"
        );
        self.bits.extend((0..width).rev().map(|i| (value >> i) & 1 == 1));
        self
    }

    pub fn reg(self, reg: Reg) -> Self {
        self.field(reg.code(), REG_BITS)
    }

    pub fn zeros(mut self, width: usize) -> Self {
        let len = self.bits.len();
        self.bits.resize(len + width, false);
        self
    }

    pub fn ones(mut self, width: usize) -> Self {
        let len = self.bits.len();
        self.bits.resize(len + width, true);
        self
    }

    /// Panics unless exactly 32 bits were written; a short or long opcode is an encoder bug.
    pub fn finish(self) -> u32 {
        assert_eq!(
            self.bits.len(),
            OPCODE_BITS,
            "opcode must be exactly {OPCODE_BITS} bits"
        );
        self.bits.load_be::<u32>()
    }
}

/// Reads `width` bits starting `start` bits from the MSB.
pub fn bits_at(raw: u32, start: usize, width: usize) -> u32 {
    raw.view_bits::<Msb0>()[start..start + width].load_be::<u32>()
}

/// Expects exactly `N` register operands.
pub(crate) fn regs<const N: usize>(
    mnemonic: &str,
    syntax: &'static str,
    ops: &[Operand],
) -> Result<[Reg; N]> {
    let mismatch = || AsmError::ArityMismatch {
        mnemonic: mnemonic.to_string(),
        syntax,
    };
    if ops.len() != N {
        return Err(mismatch());
    }
    let mut out = [Reg::Drop; N];
    for (slot, op) in out.iter_mut().zip(ops) {
        match op {
            Operand::Reg(r) => *slot = *r,
            Operand::Imm(_) => return Err(mismatch()),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_msb_first() {
        let raw = OpcodeBits::new(Group::CondFlow)
            .zeros(18)
            .field(0b1001, 4)
            .ones(5)
            .finish();
        assert_eq!(raw, 0b00011_000000000000000000_1001_11111);
        assert_eq!(bits_at(raw, 23, 4), 0b1001);
        assert_eq!(Group::of(raw), Some(Group::CondFlow));
    }

    #[test]
    #[should_panic(expected = "exactly 32 bits")]
    fn short_opcode_is_an_encoder_bug() {
        OpcodeBits::new(Group::Alu).zeros(7).finish();
    }

    #[test]
    fn mnemonics_do_not_overlap_between_groups() {
        let mut seen = std::collections::HashSet::new();
        for g in Group::ALL {
            for m in g.mnemonics() {
                assert!(seen.insert(*m), "`{m}` claimed by more than one group");
            }
        }
    }
}
