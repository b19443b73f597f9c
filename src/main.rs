//! Math Blocks terminal front end
//!
//! Stands in for the XR scene: prints the equation and the blocks, reads the
//! struck block from stdin and plays the endless mode (a wrong hit costs a life).
//!
//! Usage: `math-blocks [operation] [max_result] [seed]` or
//! `math-blocks --settings <file.json>`

#[cfg(not(target_arch = "wasm32"))]
use std::io::{self, BufRead, Write};

#[cfg(not(target_arch = "wasm32"))]
use math_blocks::quiz::{RoundController, RoundEvent};
#[cfg(not(target_arch = "wasm32"))]
use math_blocks::{GameSettings, platform};

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    platform::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = settings_from_args(&args)?;
    let mut controller = RoundController::from_settings(&settings);
    log::info!(
        "Math Blocks: {} up to {}, {} lives (seed {})",
        controller.generator().operation.as_str(),
        settings.max_result,
        settings.lives,
        controller.seed()
    );

    controller.start_round();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    'game: loop {
        for event in controller.drain_events() {
            match event {
                RoundEvent::EquationChanged(round) => {
                    println!();
                    println!("  {}", round.equation_text());
                    let blocks: Vec<String> = round
                        .slot_values()
                        .iter()
                        .enumerate()
                        .map(|(i, v)| format!("[{}] {}", i + 1, v))
                        .collect();
                    println!("  {}", blocks.join("   "));
                }
                RoundEvent::HitJudged { correct: true, .. } => println!("Correct!"),
                RoundEvent::HitJudged { correct: false, .. } => println!("Wrong, try again."),
                RoundEvent::LivesChanged { lives } => println!("Lives: {}", lives),
                RoundEvent::OutOfLives => {
                    println!("Game over.");
                    break 'game;
                }
                RoundEvent::Reset { .. } => {}
            }
        }

        print!("block> ");
        stdout.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") {
            break;
        }

        let slot_count = controller.slot_values().len();
        let slot = input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .filter(|&s| s < slot_count);
        if slot.is_none() {
            println!("Pick a block from 1 to {} (q quits).", slot_count);
            continue;
        }

        if !controller.handle_hit(slot) {
            controller.lose_life();
        }
    }

    let score = controller.scoreboard();
    println!(
        "Correct: {} | Wrong: {} | Lives: {}",
        score.correct, score.wrong, score.lives
    );
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn settings_from_args(args: &[String]) -> Result<GameSettings, Box<dyn std::error::Error>> {
    if let [flag, path] = args {
        if flag.as_str() == "--settings" {
            let json = std::fs::read_to_string(path)?;
            return Ok(GameSettings::from_json(&json)?);
        }
    }

    let operation = args.first().map(String::as_str).unwrap_or("addition");
    let max_result = args.get(1).map(String::as_str).unwrap_or("20");
    let mut settings = GameSettings::from_tags(operation, max_result);
    if let Some(seed) = args.get(2) {
        settings.seed = Some(seed.parse()?);
    }
    Ok(settings)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
