//! Mnemonic to encoder dispatch.

use std::collections::HashMap;

use crate::encoder::{Encoder, Group};
use crate::error::{AsmError, Result};
use crate::operand::{decode_operand, Resolution};
use crate::symbols::SymbolTable;

/// Outcome of a dispatch that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Encoded(u32),
    /// An operand names a label that is not declared yet.
    Deferred { label: String },
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    encoders: HashMap<&'static str, Encoder>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All four instruction families.
    pub fn standard() -> Self {
        let mut reg = Self::new();
        for group in Group::ALL {
            reg.register(group);
        }
        reg
    }

    /// Registers every mnemonic of a built-in family.
    pub fn register(&mut self, group: Group) -> Vec<(&'static str, Encoder)> {
        self.register_mnemonics(group.mnemonics(), group.encoder())
    }

    /// Points each of `mnemonics` at `encoder`. Last registration wins: a
    /// mnemonic that was already registered is taken over and its previous
    /// encoder is returned.
    pub fn register_mnemonics(
        &mut self,
        mnemonics: &[&'static str],
        encoder: Encoder,
    ) -> Vec<(&'static str, Encoder)> {
        let mut displaced = Vec::new();
        for &mnemonic in mnemonics {
            if let Some(prev) = self.encoders.insert(mnemonic, encoder) {
                tracing::warn!(
                    mnemonic,
                    prev = ?prev.group,
                    group = ?encoder.group,
                    "mnemonic re-registered"
                );
                displaced.push((mnemonic, prev));
            }
        }
        displaced
    }

    pub fn lookup(&self, mnemonic: &str) -> Option<Encoder> {
        self.encoders.get(mnemonic).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }

    /// Decodes operands left to right and encodes. The first operand naming an
    /// undeclared label short-circuits to [`Dispatch::Deferred`].
    pub fn dispatch<S: AsRef<str>>(
        &self,
        mnemonic: &str,
        operands: &[S],
        symbols: &SymbolTable,
    ) -> Result<Dispatch> {
        let encoder = self
            .lookup(mnemonic)
            .ok_or_else(|| AsmError::UnknownMnemonic(mnemonic.to_string()))?;
        let mut ops = Vec::with_capacity(operands.len());
        for token in operands {
            match decode_operand(token.as_ref(), symbols)? {
                Resolution::Resolved(op) => ops.push(op),
                Resolution::Unresolved(label) => return Ok(Dispatch::Deferred { label }),
            }
        }
        (encoder.encode)(mnemonic, &ops).map(Dispatch::Encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operand::Operand;

    fn group_of(reg: &Registry, mnemonic: &str) -> Option<Group> {
        reg.lookup(mnemonic).map(|e| e.group)
    }

    #[test]
    fn unknown_mnemonic_is_reported() {
        let reg = Registry::standard();
        let err = reg.dispatch::<&str>("jmp", &[], &SymbolTable::new()).unwrap_err();
        assert_eq!(err, AsmError::UnknownMnemonic("jmp".into()));
    }

    #[test]
    fn empty_registry_knows_nothing() {
        let reg = Registry::new();
        assert!(reg.is_empty());
        assert!(reg.dispatch("add", &["r0", "r0", "r0"], &SymbolTable::new()).is_err());
    }

    #[test]
    fn standard_families_register_without_collisions() {
        let mut reg = Registry::new();
        for group in Group::ALL {
            assert!(reg.register(group).is_empty(), "{group:?}");
        }
        assert_eq!(group_of(&reg, "test"), Some(Group::Alu));
        assert_eq!(group_of(&reg, "stm"), Some(Group::MoveCopy));
    }

    #[test]
    fn later_registration_takes_over_a_mnemonic() {
        fn always_zero(_: &str, ops: &[Operand]) -> Result<u32> {
            assert_eq!(ops.len(), 3);
            Ok(0)
        }
        let symbols = SymbolTable::new();
        let mut reg = Registry::standard();
        let before = reg.dispatch("add", &["r0", "r1", "r2"], &symbols).unwrap();
        assert_eq!(before, Dispatch::Encoded(0x0800_0820));

        let custom = Encoder { group: Group::Alu, encode: always_zero };
        let displaced = reg.register_mnemonics(&["add"], custom);
        let names: Vec<_> = displaced.iter().map(|(m, e)| (*m, e.group)).collect();
        assert_eq!(names, [("add", Group::Alu)]);

        let after = reg.dispatch("add", &["r0", "r1", "r2"], &symbols).unwrap();
        assert_eq!(after, Dispatch::Encoded(0));
        // Other mnemonics of the family keep their encoder.
        assert_ne!(reg.dispatch("sub", &["r0", "r1", "r2"], &symbols).unwrap(), Dispatch::Encoded(0));
    }

    #[test]
    fn mnemonic_can_move_to_another_family() {
        let mut reg = Registry::standard();
        let displaced = reg.register_mnemonics(&["mv"], Group::Alu.encoder());
        assert_eq!(displaced.len(), 1);
        assert_eq!(displaced[0].1.group, Group::MoveCopy);
        assert_eq!(group_of(&reg, "mv"), Some(Group::Alu));
        // The ALU encoder has no `mv`, so dispatch now goes through it and fails.
        let err = reg.dispatch("mv", &["r1", "r2"], &SymbolTable::new()).unwrap_err();
        assert_eq!(err, AsmError::UnknownMnemonic("mv".into()));
    }

    #[test]
    fn reregistering_a_family_reports_each_mnemonic() {
        let mut reg = Registry::standard();
        let displaced = reg.register(Group::CondFlow);
        assert_eq!(displaced.len(), Group::CondFlow.mnemonics().len());
        assert_eq!(group_of(&reg, "scs"), Some(Group::CondFlow));
    }

    #[test]
    fn unresolved_label_defers_before_encoding() {
        let reg = Registry::standard();
        // Arity is wrong too, but the label check happens first.
        let out = reg.dispatch("ldi", &["r0", "@later", "r1"], &SymbolTable::new()).unwrap();
        assert_eq!(out, Dispatch::Deferred { label: "@later".into() });
    }
}
