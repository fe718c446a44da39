//! Two-pass driver.
//!
//! Pass 1 (scanning) walks the program once, binding labels to the current
//! address and encoding every instruction whose operands are already known.
//! An instruction that names a not-yet-declared label gets a reserved output
//! slot and is recorded as pending. Pass 2 (resolving) re-dispatches each
//! pending instruction in encounter order, now that every label is bound.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AsmError, LineError};
use crate::lexer::{lex_line, Instruction, Line};
use crate::registry::{Dispatch, Registry};
use crate::symbols::SymbolTable;

/// Bytes per instruction word.
pub const WORD_BYTES: u32 = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsmConfig {
    /// Address of the first instruction.
    pub origin: u32,
}

/// One encoded instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assembled {
    pub line: usize,
    pub address: u32,
    pub opcode: u32,
    pub text: String,
}

#[derive(Debug)]
enum Slot {
    Ready(Assembled),
    Pending,
    Failed(LineError),
}

#[derive(Debug)]
struct Pending {
    instr: Instruction,
    address: u32,
    slot: usize,
}

pub struct Assembler {
    registry: Registry,
    symbols: SymbolTable,
    address: u32,
    slots: Vec<Slot>,
    pending: Vec<Pending>,
}

impl Assembler {
    pub fn new(config: AsmConfig) -> Self {
        Self::with_registry(config, Registry::standard())
    }

    pub fn with_registry(config: AsmConfig, registry: Registry) -> Self {
        Self {
            registry,
            symbols: SymbolTable::new(),
            address: config.origin,
            slots: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Address the next instruction will occupy.
    pub fn address(&self) -> u32 {
        self.address
    }

    /// Binds `name` to the address of the next instruction.
    pub fn declare_label(&mut self, line: usize, name: &str) -> Result<(), LineError> {
        self.symbols
            .declare(name, self.address, line)
            .map_err(|kind| LineError::new(line, kind))?;
        debug!(line, label = name, address = self.address, "label declared");
        Ok(())
    }

    /// Encodes `instr` now or defers it. Either way it takes the next slot and
    /// advances the address, also when it fails.
    pub fn add_instruction(&mut self, instr: Instruction) -> Result<(), LineError> {
        let slot = self.slots.len();
        let address = self.address;
        self.address = self.address.wrapping_add(WORD_BYTES);

        let line = instr.line;
        match self
            .registry
            .dispatch(&instr.mnemonic, &instr.operands, &self.symbols)
        {
            Ok(Dispatch::Encoded(opcode)) => {
                self.slots.push(Slot::Ready(assembled(instr, address, opcode)));
                Ok(())
            }
            Ok(Dispatch::Deferred { label }) => {
                debug!(line, %label, address, "deferred on forward label");
                self.slots.push(Slot::Pending);
                self.pending.push(Pending { instr, address, slot });
                Ok(())
            }
            Err(kind) => {
                let err = LineError::new(line, kind);
                self.slots.push(Slot::Failed(err.clone()));
                Err(err)
            }
        }
    }

    /// Lexes one raw line and feeds it to the first pass.
    pub fn add_line(&mut self, line: usize, raw: &str) -> Result<(), LineError> {
        match lex_line(line, raw).map_err(|kind| LineError::new(line, kind))? {
            Line::Blank => Ok(()),
            Line::Label(name) => self.declare_label(line, &name),
            Line::Instruction(instr) => self.add_instruction(instr),
        }
    }

    /// Feeds a whole program, stopping at the first failing line.
    pub fn add_source(&mut self, source: &str) -> Result<(), LineError> {
        for (idx, raw) in source.lines().enumerate() {
            self.add_line(idx + 1, raw)?;
        }
        Ok(())
    }

    /// Runs the resolving pass and returns one result per instruction line,
    /// in source order.
    pub fn finish(mut self) -> Vec<Result<Assembled, LineError>> {
        info!(
            instructions = self.slots.len(),
            labels = self.symbols.len(),
            deferred = self.pending.len(),
            "scan complete"
        );
        for Pending { instr, address, slot } in std::mem::take(&mut self.pending) {
            let line = instr.line;
            let filled = match self
                .registry
                .dispatch(&instr.mnemonic, &instr.operands, &self.symbols)
            {
                Ok(Dispatch::Encoded(opcode)) => {
                    debug!(line, address, "resolved deferred line");
                    Slot::Ready(assembled(instr, address, opcode))
                }
                Ok(Dispatch::Deferred { label }) => {
                    Slot::Failed(LineError::new(line, AsmError::LabelNeverDefined(label)))
                }
                Err(kind) => Slot::Failed(LineError::new(line, kind)),
            };
            self.slots[slot] = filled;
        }
        self.slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Ready(a) => Ok(a),
                Slot::Failed(e) => Err(e),
                Slot::Pending => unreachable!("pending slot left unfilled after resolving"),
            })
            .collect()
    }
}

fn assembled(instr: Instruction, address: u32, opcode: u32) -> Assembled {
    Assembled {
        line: instr.line,
        address,
        opcode,
        text: instr.text,
    }
}

/// Assembles `source` from address 0, failing on the first bad line.
pub fn assemble(source: &str) -> Result<Vec<Assembled>, LineError> {
    assemble_with(source, &AsmConfig::default())
}

pub fn assemble_with(source: &str, config: &AsmConfig) -> Result<Vec<Assembled>, LineError> {
    let mut asm = Assembler::new(*config);
    asm.add_source(source)?;
    asm.finish().into_iter().collect()
}
