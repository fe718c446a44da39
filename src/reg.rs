use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a general purpose register, always in `0..=15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Gpr(u8);

impl Gpr {
    pub const COUNT: u8 = 16;

    pub fn new(n: u8) -> Option<Self> {
        (n < Self::COUNT).then_some(Gpr(n))
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Gpr {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Gpr::new(n).ok_or_else(|| format!("register index {n} out of range 0..=15"))
    }
}

impl From<Gpr> for u8 {
    fn from(g: Gpr) -> u8 {
        g.0
    }
}

/// A register operand as it appears in a 5-bit register field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reg {
    /// General purpose register `r0`..`r15`.
    Gpr(Gpr),
    Pc,
    Sp,
    Flags,
    /// Discard sink; writes to it are dropped.
    Drop,
}

impl Reg {
    /// Returns `None` when the index is outside `0..=15`.
    pub fn gpr(n: u8) -> Option<Self> {
        Gpr::new(n).map(Reg::Gpr)
    }

    /// Special registers by their source spelling.
    pub fn special(name: &str) -> Option<Self> {
        match name {
            "pc" => Some(Reg::Pc),
            "sp" => Some(Reg::Sp),
            "flags" => Some(Reg::Flags),
            "drop" => Some(Reg::Drop),
            _ => None,
        }
    }

    /// 5-bit field value.
    pub fn code(self) -> u32 {
        match self {
            Reg::Gpr(g) => u32::from(g.index()),
            Reg::Pc => 0b10000,
            Reg::Sp => 0b10001,
            Reg::Flags => 0b10010,
            Reg::Drop => 0b11111,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0..=15 => Reg::gpr(code as u8),
            0b10000 => Some(Reg::Pc),
            0b10001 => Some(Reg::Sp),
            0b10010 => Some(Reg::Flags),
            0b11111 => Some(Reg::Drop),
            _ => None,
        }
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reg::Gpr(g) => write!(f, "r{}", g.index()),
            Reg::Pc => f.write_str("pc"),
            Reg::Sp => f.write_str("sp"),
            Reg::Flags => f.write_str("flags"),
            Reg::Drop => f.write_str("drop"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for code in (0..16).chain([0b10000, 0b10001, 0b10010, 0b11111]) {
            let reg = Reg::from_code(code).unwrap();
            assert_eq!(reg.code(), code);
        }
        assert_eq!(Reg::from_code(0b10011), None);
        assert_eq!(Reg::gpr(16), None);
    }

    #[test]
    fn gpr_index_cannot_leave_range() {
        assert_eq!(Gpr::new(20), None);
        assert_eq!(Gpr::try_from(20u8).map(Gpr::index), Err("register index 20 out of range 0..=15".into()));
        assert!(serde_json::from_str::<Reg>(r#"{"Gpr":20}"#).is_err());
        let r4: Reg = serde_json::from_str(r#"{"Gpr":4}"#).unwrap();
        assert_eq!(r4, Reg::gpr(4).unwrap());
        assert_eq!(r4.code(), 4);
    }
}
