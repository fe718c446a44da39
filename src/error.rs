/// Everything that can go wrong while turning one source line into an opcode.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("invalid register `{0}` (expected r0..r15, pc, sp, flags or drop)")]
    InvalidRegister(String),
    #[error("invalid numeric operand `{0}`")]
    InvalidOperand(String),
    #[error("unknown operand `{0}`")]
    UnknownOperand(String),
    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),
    #[error("ldi constant {0} does not fit a 17-bit value with a 4-bit shift")]
    ConstantNotRepresentable(i64),
    #[error("label `{0}` is never defined")]
    LabelNeverDefined(String),
    #[error("operand mismatch for `{mnemonic}`, expected: {syntax}")]
    ArityMismatch {
        mnemonic: String,
        syntax: &'static str,
    },
    #[error("malformed label declaration `{0}` (expected `@name:`)")]
    MalformedLabel(String),
    #[error("label `{name}` already defined in line {first_line}")]
    DuplicateLabel { name: String, first_line: usize },
}

/// An [`AsmError`] tied to the 1-based source line it came from.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("error in line {line}: {kind}")]
pub struct LineError {
    pub line: usize,
    #[source]
    pub kind: AsmError,
}

impl LineError {
    pub fn new(line: usize, kind: AsmError) -> Self {
        Self { line, kind }
    }
}

pub type Result<T, E = AsmError> = std::result::Result<T, E>;
