//! Problem generation
//!
//! Builds an equation for the configured operation and spreads the answer
//! plus plausible wrong values across the blocks.
//!
//! Operands come from `lo + floor(random * n)` draws whose exact bounds define
//! the reachable problem space. A range size `n <= 0` only happens for result
//! limits below the operation's minimum; it is clamped to 1, so the draw
//! returns `lo` and the output is degenerate but well formed.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::distribution::Distribution;
use super::equation::Equation;
use super::operation::Operation;
use crate::consts::{DEFAULT_MAX_RESULT, MAX_SLOTS};

/// Operand cap for addition and subtraction
const SUM_OPERAND_CAP: i64 = 20;
/// Cap for the first factor and for divisors
const FACTOR_CAP: i64 = 10;
/// Cap for division quotients
const QUOTIENT_CAP: i64 = 15;
/// Cap for the first operand of the fallback policy
const FALLBACK_OPERAND_CAP: i64 = 10;

/// Candidate pool size before distractors are picked
const POOL_TARGET: usize = 8;

/// Offsets around the result for sums and differences, in insertion order
const SUM_OFFSETS: [i64; 8] = [-3, -2, -1, 1, 2, 3, 4, -4];
/// Offsets applied to either factor of a product
const FACTOR_OFFSETS: [i64; 4] = [-2, -1, 1, 2];
/// Offsets around a quotient
const QUOTIENT_OFFSETS: [i64; 4] = [-2, -1, 1, 2];

/// A generated round: the equation and the block values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub equation: Equation,
    pub distribution: Distribution,
}

/// Generation parameters for one game configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemGenerator {
    pub operation: Operation,
    pub max_result: u32,
    /// Blocks available to show values on (clamped to `1..=MAX_SLOTS`)
    pub slot_count: usize,
}

impl Default for ProblemGenerator {
    fn default() -> Self {
        Self {
            operation: Operation::Addition,
            max_result: DEFAULT_MAX_RESULT,
            slot_count: MAX_SLOTS,
        }
    }
}

impl ProblemGenerator {
    pub fn new(operation: Operation, max_result: u32) -> Self {
        Self {
            operation,
            max_result,
            ..Default::default()
        }
    }

    pub fn with_slot_count(mut self, slot_count: usize) -> Self {
        self.slot_count = slot_count;
        self
    }

    /// Smallest result limit for which the operation's bounds hold
    pub fn min_max_result(operation: Operation) -> u32 {
        match operation {
            // 2 × 2 is the smallest product with both factors >= 2
            Operation::Multiplication => 4,
            _ => 2,
        }
    }

    /// True when `max_result` is too small for well-formed rounds
    pub fn is_degenerate(&self) -> bool {
        self.max_result < Self::min_max_result(self.operation)
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Problem {
        generate(rng, self.operation, self.max_result, self.slot_count)
    }
}

/// Generate an equation and its block distribution.
///
/// Never fails. Below [`ProblemGenerator::min_max_result`] the equation may
/// exceed `max_result` and slot values may repeat.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    operation: Operation,
    max_result: u32,
    slot_count: usize,
) -> Problem {
    let max = i64::from(max_result);
    let equation = match operation {
        Operation::Addition => addition(rng, max),
        Operation::Subtraction => subtraction(rng, max),
        Operation::Multiplication => multiplication(rng, max),
        Operation::Division => division(rng, max),
        Operation::Fallback => fallback(rng, max),
    };

    let slot_count = slot_count.clamp(1, MAX_SLOTS);
    let correct_index = rng.random_range(0..slot_count);

    let pool = candidate_pool(rng, &equation, max);
    let distractors = pick_distractors(&pool, equation.result, slot_count - 1);

    let floor = i64::from(operation.value_floor());
    let mut distractors = distractors.into_iter();
    let slot_values = (0..slot_count)
        .map(|i| {
            if i == correct_index {
                equation.result
            } else {
                // Too few candidates: a fresh draw, which may repeat a value
                distractors
                    .next()
                    .unwrap_or_else(|| draw(rng, floor, max - floor + 1) as u32)
            }
        })
        .collect();

    let distribution = Distribution {
        slot_values,
        correct_index,
    };

    log::debug!(
        "Generated {} (result {}), slots {:?}, correct slot {}",
        equation.text(),
        equation.result,
        distribution.slot_values,
        correct_index
    );

    Problem {
        equation,
        distribution,
    }
}

/// `low + floor(random * span)`, with `span` clamped to at least 1
fn draw<R: Rng + ?Sized>(rng: &mut R, low: i64, span: i64) -> i64 {
    low + rng.random_range(0..span.max(1))
}

fn make_equation(a: i64, b: i64, result: i64, operation: Operation) -> Equation {
    Equation::new(a as u32, b as u32, result as u32, operation)
}

fn addition<R: Rng + ?Sized>(rng: &mut R, max: i64) -> Equation {
    let a = draw(rng, 1, (max - 1).min(SUM_OPERAND_CAP));
    let b = draw(rng, 1, (max - a - 1).min(SUM_OPERAND_CAP).max(1));
    make_equation(a, b, a + b, Operation::Addition)
}

fn subtraction<R: Rng + ?Sized>(rng: &mut R, max: i64) -> Equation {
    let result = draw(rng, 0, max.min(SUM_OPERAND_CAP));
    let b = draw(rng, 1, SUM_OPERAND_CAP.min(max - result));
    make_equation(result + b, b, result, Operation::Subtraction)
}

fn multiplication<R: Rng + ?Sized>(rng: &mut R, max: i64) -> Equation {
    // `a` stays at or below max / 2 so that b = 2 still fits under max
    let a = draw(rng, 2, FACTOR_CAP.min(max / 2 - 1));
    let b_max = max / a;
    let b = draw(rng, 2, (b_max - 1).min(FACTOR_CAP).max(1));
    make_equation(a, b, a * b, Operation::Multiplication)
}

fn division<R: Rng + ?Sized>(rng: &mut R, max: i64) -> Equation {
    let result = draw(rng, 2, (max - 1).min(QUOTIENT_CAP));
    let b = draw(rng, 2, FACTOR_CAP.min(max / result));
    make_equation(result * b, b, result, Operation::Division)
}

fn fallback<R: Rng + ?Sized>(rng: &mut R, max: i64) -> Equation {
    let a = draw(rng, 1, FALLBACK_OPERAND_CAP);
    let b = draw(rng, 1, (max - a).max(1));
    make_equation(a, b, a + b, Operation::Fallback)
}

fn admit(pool: &mut Vec<u32>, value: i64, floor: i64, max: i64) {
    if (floor..=max).contains(&value) {
        let value = value as u32;
        if !pool.contains(&value) {
            pool.push(value);
        }
    }
}

/// Plausible wrong answers first, then random values in range up to the pool target.
///
/// Insertion order is kept; it decides which distractors are used.
fn candidate_pool<R: Rng + ?Sized>(rng: &mut R, equation: &Equation, max: i64) -> Vec<u32> {
    let floor = i64::from(equation.operation.value_floor());
    let result = i64::from(equation.result);
    let mut pool = Vec::with_capacity(POOL_TARGET);

    match equation.operation {
        Operation::Addition | Operation::Subtraction => {
            for d in SUM_OFFSETS {
                admit(&mut pool, result + d, floor, max);
            }
        }
        Operation::Multiplication => {
            let (a, b) = (i64::from(equation.a), i64::from(equation.b));
            for d in FACTOR_OFFSETS {
                for v in [(a + d) * b, a * (b + d)] {
                    if v != result {
                        admit(&mut pool, v, floor, max);
                    }
                }
            }
        }
        Operation::Division => {
            for d in QUOTIENT_OFFSETS {
                admit(&mut pool, result + d, floor, max);
            }
        }
        Operation::Fallback => {}
    }

    // Never ask for more distinct values than the range holds
    let range_size = usize::try_from(max - floor + 1).unwrap_or(0);
    let target = POOL_TARGET.min(range_size);
    while pool.len() < target {
        let v = draw(rng, floor, max - floor + 1);
        admit(&mut pool, v, floor, max);
    }

    pool
}

/// First `count` pool values that differ from the result and from each other
fn pick_distractors(pool: &[u32], result: u32, count: usize) -> Vec<u32> {
    let mut wrong = Vec::with_capacity(count);
    for &v in pool {
        if wrong.len() >= count {
            break;
        }
        if v != result && !wrong.contains(&v) {
            wrong.push(v);
        }
    }
    wrong
}
