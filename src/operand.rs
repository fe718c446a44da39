//! Operand tokens to registers, integers, or pending label references.
//!
//! Rules are tried in order and the first match wins:
//! 1. `r<digits>` is a general purpose register (`r0`..`r15`).
//! 2. `pc`, `sp`, `flags`, `drop` are the special registers.
//! 3. An optional `-` followed by a decimal digit (including the `0x` and
//!    `0b` prefixes) is an integer.
//! 4. `@name` is a label; it resolves to the label's address if declared,
//!    otherwise it is reported as unresolved so the line can be deferred.
//! 5. Anything else is an unknown operand.

use crate::error::{AsmError, Result};
use crate::reg::Reg;
use crate::symbols::{SymbolTable, LABEL_SIGIL};

/// A fully decoded operand, ready for an encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Reg(Reg),
    Imm(i64),
}

/// Outcome of decoding a single operand token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(Operand),
    /// Label not (yet) in the symbol table.
    Unresolved(String),
}

pub fn decode_operand(token: &str, symbols: &SymbolTable) -> Result<Resolution> {
    if let Some(digits) = token.strip_prefix('r') {
        return parse_gpr(digits)
            .map(|r| Resolution::Resolved(Operand::Reg(r)))
            .ok_or_else(|| AsmError::InvalidRegister(token.to_string()));
    }
    if let Some(reg) = Reg::special(token) {
        return Ok(Resolution::Resolved(Operand::Reg(reg)));
    }
    if looks_numeric(token) {
        return parse_int(token).map(|v| Resolution::Resolved(Operand::Imm(v)));
    }
    if token.starts_with(LABEL_SIGIL) && token.len() > LABEL_SIGIL.len_utf8() {
        return Ok(match symbols.address_of(token) {
            Some(addr) => Resolution::Resolved(Operand::Imm(i64::from(addr))),
            None => Resolution::Unresolved(token.to_string()),
        });
    }
    Err(AsmError::UnknownOperand(token.to_string()))
}

fn parse_gpr(digits: &str) -> Option<Reg> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u8>().ok().and_then(Reg::gpr)
}

fn looks_numeric(token: &str) -> bool {
    let body = token.strip_prefix('-').unwrap_or(token);
    body.starts_with(|c: char| c.is_ascii_digit())
}

/// Parses a decimal, `0x` hex or `0b` binary integer with an optional leading `-`.
pub fn parse_int(token: &str) -> Result<i64> {
    let invalid = || AsmError::InvalidOperand(token.to_string());
    let (negative, body) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    let (radix, digits) = if let Some(hex) = body.strip_prefix("0x") {
        (16, hex)
    } else if let Some(bin) = body.strip_prefix("0b") {
        (2, bin)
    } else {
        (10, body)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }
    let magnitude = i64::from_str_radix(digits, radix).map_err(|_| invalid())?;
    Ok(if negative { -magnitude } else { magnitude })
}
