//! Deterministic quiz module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (callers pass the generator in)
//! - Stable candidate order when picking distractors
//! - No rendering, audio or platform dependencies

pub mod distribution;
pub mod equation;
pub mod generator;
pub mod operation;
pub mod round;

pub use distribution::Distribution;
pub use equation::Equation;
pub use generator::{Problem, ProblemGenerator};
pub use operation::Operation;
pub use round::{Round, RoundController, RoundEvent, RoundState, Scoreboard};
