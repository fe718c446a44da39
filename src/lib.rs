pub mod assembler;
pub mod decoder;
pub mod disasm;
pub mod encoder;
pub mod error;
pub mod lexer;
pub mod listing;
pub mod operand;
pub mod reg;
pub mod registry;
pub mod symbols;

pub mod isa {
    pub mod alu; // arithmetic/logic
    pub mod condfc; // conditional skips
    pub mod ldi; // load immediate
    pub mod mvcp; // move/copy
}

pub use assembler::{assemble, assemble_with, AsmConfig, Assembled, Assembler};
pub use error::{AsmError, LineError};
pub use reg::{Gpr, Reg};
