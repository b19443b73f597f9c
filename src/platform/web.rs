//! JS bindings for the quiz controller
//!
//! The XR scene owns the blocks and calls into [`QuizSession`] when a block
//! is struck, then re-renders from the getters.

use serde_json::json;
use wasm_bindgen::prelude::*;

use crate::quiz::{RoundController, RoundEvent};
use crate::settings::GameSettings;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    super::init_logging();
    log::info!("Math Blocks core loaded");
}

/// One play session, exposed to JS
#[wasm_bindgen]
pub struct QuizSession {
    controller: RoundController,
}

#[wasm_bindgen]
impl QuizSession {
    /// Create a session; pass a seed for a reproducible game
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> QuizSession {
        let settings = GameSettings {
            seed,
            ..Default::default()
        };
        QuizSession {
            controller: RoundController::from_settings(&settings),
        }
    }

    pub fn configure(&mut self, operation: &str, max_result: u32) {
        self.controller.configure_tag(operation, max_result);
    }

    #[wasm_bindgen(js_name = setSlotCount)]
    pub fn set_slot_count(&mut self, slot_count: u32) {
        self.controller.set_slot_count(slot_count as usize);
    }

    #[wasm_bindgen(js_name = startRound)]
    pub fn start_round(&mut self) {
        self.controller.start_round();
    }

    /// Judge a strike on block `slot`; `undefined` is ignored
    #[wasm_bindgen(js_name = handleHit)]
    pub fn handle_hit(&mut self, slot: Option<u32>) -> bool {
        self.controller.handle_hit(slot.map(|s| s as usize))
    }

    pub fn reset(&mut self, lives: u8) {
        self.controller.reset(lives);
    }

    #[wasm_bindgen(js_name = loseLife)]
    pub fn lose_life(&mut self) -> u8 {
        self.controller.lose_life()
    }

    #[wasm_bindgen(getter, js_name = equationText)]
    pub fn equation_text(&self) -> String {
        self.controller.equation_text().unwrap_or_default()
    }

    #[wasm_bindgen(getter, js_name = slotValues)]
    pub fn slot_values(&self) -> Vec<u32> {
        self.controller.slot_values().to_vec()
    }

    #[wasm_bindgen(getter, js_name = correctIndex)]
    pub fn correct_index(&self) -> Option<u32> {
        self.controller.correct_index().map(|i| i as u32)
    }

    #[wasm_bindgen(getter, js_name = correctCount)]
    pub fn correct_count(&self) -> u32 {
        self.controller.correct_count()
    }

    #[wasm_bindgen(getter, js_name = wrongCount)]
    pub fn wrong_count(&self) -> u32 {
        self.controller.wrong_count()
    }

    #[wasm_bindgen(getter, js_name = livesRemaining)]
    pub fn lives_remaining(&self) -> u8 {
        self.controller.lives_remaining()
    }

    /// Pending events as a JSON array of `{ "type": ..., ... }` objects
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> String {
        let events: Vec<_> = self
            .controller
            .drain_events()
            .into_iter()
            .map(|event| match event {
                RoundEvent::EquationChanged(round) => json!({
                    "type": "equationChanged",
                    "round": round.id,
                    "text": round.equation_text(),
                    "slots": round.slot_values(),
                    "correctIndex": round.correct_index(),
                }),
                RoundEvent::HitJudged { slot, correct } => json!({
                    "type": "hit",
                    "slot": slot,
                    "correct": correct,
                }),
                RoundEvent::LivesChanged { lives } => json!({ "type": "livesChanged", "lives": lives }),
                RoundEvent::OutOfLives => json!({ "type": "outOfLives" }),
                RoundEvent::Reset { lives } => json!({ "type": "reset", "lives": lives }),
            })
            .collect();
        serde_json::Value::Array(events).to_string()
    }
}
