//! HUD status line
//!
//! The engine only decides which message applies; presentation belongs to the
//! HUD adapter.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One-line status shown under the HUD counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusHint {
    ChooseDifficulty,
    LevelStart { level: u32 },
    LevelClear { level: u32, bonus: u64, extra_life: bool },
    NicePop,
    Combo { combo: u32 },
    /// Nothing popped for a while after a spawn
    TrackBalloon,
    GameOver { score: u64 },
}

impl fmt::Display for StatusHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusHint::ChooseDifficulty => {
                write!(f, "Pick a difficulty and allow camera access.")
            }
            StatusHint::LevelStart { level } => write!(f, "LEVEL {level} START"),
            StatusHint::LevelClear {
                level,
                bonus,
                extra_life,
            } => {
                write!(f, "LEVEL {level} CLEAR +{bonus}")?;
                if *extra_life {
                    write!(f, " | +1 LIFE")?;
                }
                Ok(())
            }
            StatusHint::NicePop => write!(f, "Nice pop!"),
            StatusHint::Combo { combo } => write!(f, "Combo x{combo}"),
            StatusHint::TrackBalloon => write!(f, "Track a balloon with your fingertip."),
            StatusHint::GameOver { score } => write!(f, "Game over. Final score: {score}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(StatusHint::LevelStart { level: 3 }.to_string(), "LEVEL 3 START");
        assert_eq!(
            StatusHint::LevelClear {
                level: 2,
                bonus: 80,
                extra_life: true
            }
            .to_string(),
            "LEVEL 2 CLEAR +80 | +1 LIFE"
        );
        assert_eq!(
            StatusHint::LevelClear {
                level: 1,
                bonus: 60,
                extra_life: false
            }
            .to_string(),
            "LEVEL 1 CLEAR +60"
        );
        assert_eq!(StatusHint::Combo { combo: 4 }.to_string(), "Combo x4");
        assert_eq!(
            StatusHint::GameOver { score: 120 }.to_string(),
            "Game over. Final score: 120"
        );
    }
}
