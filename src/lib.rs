//! Math Blocks - An arithmetic quiz played by striking floating answer blocks
//!
//! Core modules:
//! - `quiz`: Deterministic problem generation and round judging
//! - `settings`: Game configuration (operation, result range, lives)
//! - `platform`: Native/web platform glue (logging, wasm bindings)
//!
//! Rendering, audio and the XR session are owned by the host application.
//! It reads round snapshots from [`quiz::RoundController`] and reports which
//! block the player struck.

pub mod platform;
pub mod quiz;
pub mod settings;

pub use quiz::{Distribution, Equation, Operation, Problem, ProblemGenerator, Round, RoundController};
pub use settings::{GameSettings, MaxResultPreset};

/// Game configuration constants
pub mod consts {
    /// Largest result offered when no setting is given
    pub const DEFAULT_MAX_RESULT: u32 = 20;
    /// Lives at the start of a game
    pub const DEFAULT_LIVES: u8 = 3;
    /// Answer blocks placed in front of the player
    pub const MAX_SLOTS: usize = 4;
}
