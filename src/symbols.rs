use std::collections::HashMap;

use crate::error::{AsmError, Result};

/// Labels start with this sigil, both at declaration and at use.
pub const LABEL_SIGIL: char = '@';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub address: u32,
    /// Line of the declaration.
    pub line: usize,
}

/// Label name (including the sigil) to address. Owned by one assembler run.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` once; a second declaration is rejected and the first binding kept.
    pub fn declare(&mut self, name: &str, address: u32, line: usize) -> Result<()> {
        if let Some(prev) = self.symbols.get(name) {
            return Err(AsmError::DuplicateLabel {
                name: name.to_string(),
                first_line: prev.line,
            });
        }
        self.symbols.insert(name.to_string(), Symbol { address, line });
        Ok(())
    }

    pub fn address_of(&self, name: &str) -> Option<u32> {
        self.symbols.get(name).map(|s| s.address)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
