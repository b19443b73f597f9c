//! Equation shown above the blocks

use serde::{Deserialize, Serialize};

use super::operation::Operation;

/// `a <op> b = result`, with the result hidden from the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equation {
    pub a: u32,
    pub b: u32,
    pub result: u32,
    pub operation: Operation,
}

impl Equation {
    pub fn new(a: u32, b: u32, result: u32, operation: Operation) -> Self {
        Self {
            a,
            b,
            result,
            operation,
        }
    }

    pub fn operator_symbol(&self) -> &'static str {
        self.operation.symbol()
    }

    /// Display text, e.g. `"7 × 3 = ?"`
    pub fn text(&self) -> String {
        format!("{} {} {} = ?", self.a, self.operator_symbol(), self.b)
    }

    /// True when applying the operator to the operands yields exactly `result`
    pub fn is_consistent(&self) -> bool {
        self.operation.apply(self.a, self.b) == Some(self.result)
    }
}
