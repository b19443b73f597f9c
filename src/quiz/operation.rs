//! Arithmetic operations offered by the quiz

use serde::{Deserialize, Serialize};

/// The arithmetic kind a round asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Addition,
    Subtraction,
    Multiplication,
    Division,
    /// Unrecognized operation tag. Plays as addition with small operands.
    #[serde(other)]
    Fallback,
}

impl Operation {
    /// All recognized operations, in menu order
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Addition => "addition",
            Operation::Subtraction => "subtraction",
            Operation::Multiplication => "multiplication",
            Operation::Division => "division",
            Operation::Fallback => "fallback",
        }
    }

    /// Strict parse of a settings tag; `None` for anything unrecognized
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "addition" | "add" | "+" => Some(Operation::Addition),
            "subtraction" | "sub" | "-" => Some(Operation::Subtraction),
            "multiplication" | "mul" | "×" | "*" => Some(Operation::Multiplication),
            "division" | "div" | "÷" | "/" => Some(Operation::Division),
            _ => None,
        }
    }

    /// Lenient parse used by the settings entry points.
    ///
    /// Unknown tags are not an error: they map to [`Operation::Fallback`].
    pub fn from_tag(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            log::warn!("Unrecognized operation {:?}, using addition fallback", s);
            Operation::Fallback
        })
    }

    /// Symbol shown between the operands
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Addition | Operation::Fallback => "+",
            Operation::Subtraction => "-",
            Operation::Multiplication => "×",
            Operation::Division => "÷",
        }
    }

    /// Apply the operation, `None` when the result is not a non-negative integer
    pub fn apply(&self, a: u32, b: u32) -> Option<u32> {
        match self {
            Operation::Addition | Operation::Fallback => a.checked_add(b),
            Operation::Subtraction => a.checked_sub(b),
            Operation::Multiplication => a.checked_mul(b),
            Operation::Division => {
                if b == 0 || a % b != 0 {
                    None
                } else {
                    Some(a / b)
                }
            }
        }
    }

    /// Smallest value a block may show for this operation
    pub fn value_floor(&self) -> u32 {
        match self {
            Operation::Division => 1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for op in Operation::ALL {
            assert_eq!(Operation::parse(op.as_str()), Some(op));
            assert_eq!(Operation::from_tag(op.as_str()), op);
        }
    }

    #[test]
    fn test_unknown_tag_falls_back() {
        assert_eq!(Operation::parse("modulo"), None);
        assert_eq!(Operation::from_tag("modulo"), Operation::Fallback);
        assert_eq!(Operation::from_tag(""), Operation::Fallback);
        assert_eq!(Operation::Fallback.symbol(), "+");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Operation::parse(" Division "), Some(Operation::Division));
        assert_eq!(Operation::parse("MULTIPLICATION"), Some(Operation::Multiplication));
    }

    #[test]
    fn test_apply() {
        assert_eq!(Operation::Addition.apply(7, 5), Some(12));
        assert_eq!(Operation::Subtraction.apply(7, 5), Some(2));
        assert_eq!(Operation::Subtraction.apply(5, 7), None);
        assert_eq!(Operation::Multiplication.apply(7, 5), Some(35));
        assert_eq!(Operation::Division.apply(35, 5), Some(7));
        assert_eq!(Operation::Division.apply(36, 5), None);
        assert_eq!(Operation::Division.apply(3, 0), None);
    }

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&Operation::Multiplication).unwrap();
        assert_eq!(json, "\"multiplication\"");
        let op: Operation = serde_json::from_str("\"modulo\"").unwrap();
        assert_eq!(op, Operation::Fallback);
    }
}
