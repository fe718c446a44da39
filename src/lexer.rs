//! Splits raw source lines into labels and instructions.

use crate::error::{AsmError, Result};
use crate::symbols::LABEL_SIGIL;

pub const COMMENT: char = ';';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// 1-based source line.
    pub line: usize,
    pub mnemonic: String,
    pub operands: Vec<String>,
    /// Source text as written, for listings.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Blank,
    Label(String),
    Instruction(Instruction),
}

pub fn lex_line(line: usize, raw: &str) -> Result<Line> {
    let code = match raw.find(COMMENT) {
        Some(p) => &raw[..p],
        None => raw,
    };
    let code = code.trim();
    if code.is_empty() {
        return Ok(Line::Blank);
    }
    if code.starts_with(LABEL_SIGIL) {
        return lex_label(code).map(Line::Label);
    }
    let mut tokens = code
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());
    // `code` is non-empty and trimmed, so there is a first token.
    let mnemonic = tokens.next().unwrap_or_default().to_lowercase();
    Ok(Line::Instruction(Instruction {
        line,
        mnemonic,
        operands: tokens.map(str::to_string).collect(),
        text: raw.trim_end().to_string(),
    }))
}

fn lex_label(code: &str) -> Result<String> {
    let malformed = || AsmError::MalformedLabel(code.to_string());
    let (name, rest) = code.split_once(':').ok_or_else(malformed)?;
    let valid = name.len() > LABEL_SIGIL.len_utf8()
        && !name.contains(char::is_whitespace)
        && rest.trim().is_empty();
    if !valid {
        return Err(malformed());
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_on_commas_and_spaces() {
        let Line::Instruction(i) = lex_line(3, "  ADD r0,r1 , r2 ; sum").unwrap() else {
            panic!("expected instruction");
        };
        assert_eq!(i.mnemonic, "add");
        assert_eq!(i.operands, vec!["r0", "r1", "r2"]);
        assert_eq!(i.line, 3);
        assert_eq!(i.text, "  ADD r0,r1 , r2 ; sum");
    }

    #[test]
    fn labels_and_blanks() {
        assert_eq!(lex_line(1, "@loop: ; top").unwrap(), Line::Label("@loop".into()));
        assert_eq!(lex_line(1, "   ; only a comment").unwrap(), Line::Blank);
        assert_eq!(lex_line(1, "").unwrap(), Line::Blank);
    }

    #[test]
    fn malformed_labels() {
        for bad in ["@loop", "@:", "@a b:", "@loop: add r0, r0, r0"] {
            assert!(
                matches!(lex_line(1, bad), Err(AsmError::MalformedLabel(_))),
                "{bad} should be rejected"
            );
        }
    }
}
