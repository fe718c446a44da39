//! `ldi dest, const`: load a 32-bit constant packed as a 17-bit value and a
//! 4-bit left shift.
//!
//! Layout: `[group:5][0:1][shift:4][value:17][dest:5]`.
//!
//! The constant's two's-complement form is narrowed to 17 bits one bit at a
//! time. A leading bit is dropped while the top two bits both equal the sign
//! bit; otherwise a trailing zero is dropped and the shift grows. If neither
//! applies the constant cannot be encoded. Decoding sign-extends the value
//! from its top bit and shifts it back left.

use serde::{Deserialize, Serialize};

use crate::decoder::Decoded;
use crate::encoder::{bits_at, Group, OpcodeBits};
use crate::error::{AsmError, Result};
use crate::operand::Operand;
use crate::reg::Reg;

pub const MNEMONICS: &[&str] = &["ldi"];

pub const VALUE_BITS: usize = 17;
pub const SHIFT_BITS: usize = 4;

const SYNTAX: &str = "ldi dest, const";

/// Lowest and one past the highest accepted constant.
pub const MIN_CONSTANT: i64 = -(1 << 31);
pub const MAX_CONSTANT_EXCLUSIVE: i64 = 1 << 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packed {
    pub value: u32,
    pub shift: u8,
}

impl Packed {
    pub fn pack(constant: i64) -> Result<Self> {
        if !(MIN_CONSTANT..MAX_CONSTANT_EXCLUSIVE).contains(&constant) {
            return Err(AsmError::ConstantNotRepresentable(constant));
        }
        // Two's complement for negatives, identity for 0..2^32.
        let word = constant as u32;
        let extend = word >> 31;

        let mut value = word;
        let mut len = 32usize;
        let mut shift = 0u8;
        while len > VALUE_BITS {
            let top = (value >> (len - 1)) & 1;
            let next = (value >> (len - 2)) & 1;
            if top == extend && next == extend {
                value &= (1u32 << (len - 1)) - 1;
            } else if value & 1 == 0 {
                value >>= 1;
                shift += 1;
            } else {
                return Err(AsmError::ConstantNotRepresentable(constant));
            }
            len -= 1;
        }

        let packed = Packed { value, shift };
        assert_eq!(
            packed.unpack(),
            word,
            "ldi reconstruction mismatch for {constant:#x}: {packed:?}"
        );
        Ok(packed)
    }

    /// The 32-bit constant this value/shift pair stands for.
    pub fn unpack(self) -> u32 {
        let pad = 32 - VALUE_BITS;
        let extended = ((self.value << pad) as i32 >> pad) as u32;
        extended << self.shift
    }
}

pub fn encode(mnemonic: &str, ops: &[Operand]) -> Result<u32> {
    let (dest, constant) = match ops {
        [Operand::Reg(dest), Operand::Imm(c)] => (*dest, *c),
        _ => {
            return Err(AsmError::ArityMismatch {
                mnemonic: mnemonic.to_string(),
                syntax: SYNTAX,
            })
        }
    };
    let packed = Packed::pack(constant)?;
    Ok(OpcodeBits::new(Group::LoadImmediate)
        .zeros(1)
        .field(u32::from(packed.shift), SHIFT_BITS)
        .field(packed.value, VALUE_BITS)
        .reg(dest)
        .finish())
}

pub fn decode(raw: u32) -> Option<Decoded> {
    if bits_at(raw, 5, 1) != 0 {
        return None;
    }
    let packed = Packed {
        shift: bits_at(raw, 6, SHIFT_BITS) as u8,
        value: bits_at(raw, 10, VALUE_BITS),
    };
    let dest = Reg::from_code(bits_at(raw, 27, 5))?;
    Some(Decoded::Ldi { dest, packed })
}
