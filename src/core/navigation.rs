use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::core::{Phase, SessionState};
use crate::utils::CardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Gate,
    Puzzle,
    Journey,
    Card,
    Inside,
    Farewell,
}

/// Intent handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    GoTo(Screen),
    Stay,
}

impl Screen {
    pub const ALL: [Screen; 6] = [
        Screen::Gate,
        Screen::Puzzle,
        Screen::Journey,
        Screen::Card,
        Screen::Inside,
        Screen::Farewell,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Screen::Gate => "gate",
            Screen::Puzzle => "puzzle",
            Screen::Journey => "journey",
            Screen::Card => "card",
            Screen::Inside => "inside",
            Screen::Farewell => "farewell",
        }
    }

    /// Whether the session may show this screen right now.
    pub fn is_unlocked(self, session: &SessionState) -> bool {
        match self {
            Screen::Gate => true,
            Screen::Puzzle => session.gate_passed(),
            Screen::Journey => session.puzzle1_solved(),
            Screen::Card => session.puzzle2_solved(),
            Screen::Inside | Screen::Farewell => session.card_opened(),
        }
    }

    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::AtGate => Screen::Gate,
            Phase::PuzzleActive => Screen::Puzzle,
            Phase::JourneyActive => Screen::Journey,
            Phase::CardActive => Screen::Card,
            Phase::CardOpened => Screen::Inside,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Screen {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_start_matches('/').to_lowercase();
        Screen::ALL
            .into_iter()
            .find(|screen| screen.name() == wanted)
            .ok_or_else(|| CardError::screen_not_found(s))
    }
}

/// Entry check run every time a screen is shown, not only on transitions.
/// Locked screens fall back to the gate.
pub fn guard(requested: Screen, session: &SessionState) -> Screen {
    if requested.is_unlocked(session) {
        requested
    } else {
        Screen::Gate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PuzzleEngine;

    #[test]
    fn test_fresh_session_only_sees_gate() {
        let session = SessionState::new();
        for screen in Screen::ALL {
            assert_eq!(guard(screen, &session), Screen::Gate);
        }
    }

    #[test]
    fn test_gate_unlocks_puzzle_only() {
        let mut session = SessionState::new();
        session.pass_gate("Dad");

        assert_eq!(guard(Screen::Puzzle, &session), Screen::Puzzle);
        assert_eq!(guard(Screen::Journey, &session), Screen::Gate);
        assert_eq!(guard(Screen::Card, &session), Screen::Gate);
        assert_eq!(guard(Screen::Inside, &session), Screen::Gate);
    }

    #[test]
    fn test_solved_puzzle_unlocks_journey() {
        let mut session = SessionState::new();
        session.pass_gate("Dad");
        let mut puzzle = PuzzleEngine::from_positions("p", &[1, 0, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        puzzle.select(0);
        puzzle.select(1);
        session.complete_puzzle(&puzzle);

        assert_eq!(guard(Screen::Journey, &session), Screen::Journey);
        assert_eq!(guard(Screen::Puzzle, &session), Screen::Puzzle);
        assert_eq!(guard(Screen::Card, &session), Screen::Gate);
    }

    #[test]
    fn test_parse_screen() {
        assert_eq!("journey".parse::<Screen>().unwrap(), Screen::Journey);
        assert_eq!("/Inside".parse::<Screen>().unwrap(), Screen::Inside);
        assert!("thankyou".parse::<Screen>().is_err());
    }

    #[test]
    fn test_screen_for_phase() {
        assert_eq!(Screen::for_phase(Phase::AtGate), Screen::Gate);
        assert_eq!(Screen::for_phase(Phase::CardOpened), Screen::Inside);
    }
}
