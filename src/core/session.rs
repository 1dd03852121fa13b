use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use crate::core::{JourneyTracker, PuzzleEngine};

/// How far the recipient has progressed. Derived from the session flags,
/// never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    AtGate,
    PuzzleActive,
    JourneyActive,
    CardActive,
    CardOpened,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::CardOpened)
    }
}

/// The one mutable record of a run. Flags only ever flip to `true` and only
/// through the methods below, each of which checks that the session is in
/// the phase it advances from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub id: Uuid,
    stage: u32,
    gate_passed: bool,
    puzzle1_solved: bool,
    puzzle2_solved: bool,
    card_opened: bool,
    user_name: String,
    started_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            stage: 0,
            gate_passed: false,
            puzzle1_solved: false,
            puzzle2_solved: false,
            card_opened: false,
            user_name: String::new(),
            started_at: Utc::now(),
        }
    }

    pub fn phase(&self) -> Phase {
        if self.card_opened {
            Phase::CardOpened
        } else if self.puzzle2_solved {
            Phase::CardActive
        } else if self.puzzle1_solved {
            Phase::JourneyActive
        } else if self.gate_passed {
            Phase::PuzzleActive
        } else {
            Phase::AtGate
        }
    }

    pub fn pass_gate<S: Into<String>>(&mut self, user_name: S) -> bool {
        if self.phase() != Phase::AtGate {
            return false;
        }

        self.gate_passed = true;
        self.user_name = user_name.into();
        self.stage += 1;
        true
    }

    pub fn complete_puzzle(&mut self, puzzle: &PuzzleEngine) -> bool {
        if self.phase() != Phase::PuzzleActive || !puzzle.is_solved() {
            return false;
        }

        self.puzzle1_solved = true;
        self.stage += 1;
        true
    }

    pub fn complete_journey(&mut self, journey: &JourneyTracker) -> bool {
        if self.phase() != Phase::JourneyActive || !journey.is_complete() {
            return false;
        }

        self.puzzle2_solved = true;
        self.stage += 1;
        true
    }

    pub fn open_card(&mut self) -> bool {
        if self.phase() != Phase::CardActive {
            return false;
        }

        self.card_opened = true;
        true
    }

    pub fn stage(&self) -> u32 {
        self.stage
    }

    pub fn gate_passed(&self) -> bool {
        self.gate_passed
    }

    pub fn puzzle1_solved(&self) -> bool {
        self.puzzle1_solved
    }

    pub fn puzzle2_solved(&self) -> bool {
        self.puzzle2_solved
    }

    pub fn card_opened(&self) -> bool {
        self.card_opened
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn elapsed_seconds(&self) -> i64 {
        Utc::now().signed_duration_since(self.started_at).num_seconds()
    }

    pub fn get_elapsed_formatted(&self) -> String {
        format_duration(self.elapsed_seconds())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_duration(total_seconds: i64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solved_puzzle() -> PuzzleEngine {
        let mut puzzle = PuzzleEngine::from_positions("p", &[1, 0, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        puzzle.select(0);
        puzzle.select(1);
        puzzle
    }

    fn walked_journey() -> JourneyTracker {
        let mut journey = JourneyTracker::new(3);
        journey.visit(1);
        journey.visit(2);
        journey
    }

    #[test]
    fn test_session_defaults() {
        let session = SessionState::new();
        assert_eq!(session.stage(), 0);
        assert_eq!(session.phase(), Phase::AtGate);
        assert!(!session.gate_passed());
        assert!(!session.card_opened());
        assert!(session.user_name().is_empty());
    }

    #[test]
    fn test_linear_progression() {
        let mut session = SessionState::new();

        assert!(session.pass_gate("Dad"));
        assert_eq!(session.stage(), 1);
        assert_eq!(session.phase(), Phase::PuzzleActive);
        assert_eq!(session.user_name(), "Dad");

        assert!(session.complete_puzzle(&solved_puzzle()));
        assert_eq!(session.stage(), 2);
        assert_eq!(session.phase(), Phase::JourneyActive);

        assert!(session.complete_journey(&walked_journey()));
        assert_eq!(session.stage(), 3);
        assert_eq!(session.phase(), Phase::CardActive);

        assert!(session.open_card());
        assert_eq!(session.stage(), 3);
        assert_eq!(session.phase(), Phase::CardOpened);
        assert!(session.phase().is_terminal());
    }

    #[test]
    fn test_out_of_order_transitions_are_ignored() {
        let mut session = SessionState::new();

        assert!(!session.open_card());
        assert!(!session.complete_journey(&walked_journey()));
        assert!(!session.complete_puzzle(&solved_puzzle()));
        assert_eq!(session.stage(), 0);
        assert_eq!(session.phase(), Phase::AtGate);

        session.pass_gate("Dad");
        assert!(!session.pass_gate("Someone else"));
        assert_eq!(session.user_name(), "Dad");
        assert_eq!(session.stage(), 1);
    }

    #[test]
    fn test_unsolved_puzzle_blocks_progress() {
        let mut session = SessionState::new();
        session.pass_gate("Dad");

        let unsolved = PuzzleEngine::from_positions("p", &[1, 0, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert!(!session.complete_puzzle(&unsolved));
        assert!(!session.puzzle1_solved());
        assert_eq!(session.stage(), 1);
    }

    #[test]
    fn test_unfinished_journey_blocks_progress() {
        let mut session = SessionState::new();
        session.pass_gate("Dad");
        session.complete_puzzle(&solved_puzzle());

        let mut journey = JourneyTracker::new(3);
        journey.visit(1);
        assert!(!session.complete_journey(&journey));
        assert_eq!(session.phase(), Phase::JourneyActive);
    }

    #[test]
    fn test_terminal_state_does_not_move() {
        let mut session = SessionState::new();
        session.pass_gate("Dad");
        session.complete_puzzle(&solved_puzzle());
        session.complete_journey(&walked_journey());
        session.open_card();

        assert!(!session.open_card());
        assert_eq!(session.stage(), 3);
        assert_eq!(session.phase(), Phase::CardOpened);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(3725), "1h 2m 5s");
    }
}
