use serde::Serialize;

use crate::encoder::Group;
use crate::isa::alu::AluOp;
use crate::isa::condfc::Cond;
use crate::isa::ldi::Packed;
use crate::isa::mvcp::MoveOp;
use crate::isa::{alu, condfc, ldi, mvcp};
use crate::reg::Reg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Decoded {
    Ldi {
        dest: Reg,
        packed: Packed,
    },
    Alu {
        op: AluOp,
        dest: Reg,
        src0: Reg,
        src1: Option<Reg>, // None for unary ops
    },
    Move {
        op: MoveOp,
        dest: Reg,
        src: Reg,
    },
    Skip {
        cond: Cond,
    },
}

pub trait Decoder {
    fn decode(&self, raw32: u32) -> Option<Decoded>;
}

/// Decoder for the opcodes produced by this crate's encoders.
/// Anything the encoders would never emit decodes to `None`.
pub struct Nd32Decoder;

impl Nd32Decoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Nd32Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for Nd32Decoder {
    fn decode(&self, raw32: u32) -> Option<Decoded> {
        match Group::of(raw32)? {
            Group::LoadImmediate => ldi::decode(raw32),
            Group::Alu => alu::decode(raw32),
            Group::MoveCopy => mvcp::decode(raw32),
            Group::CondFlow => condfc::decode(raw32),
        }
    }
}
