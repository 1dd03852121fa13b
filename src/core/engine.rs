use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::config::Config;
use crate::content::{ContentPack, Photo, PhotoCatalog, Waypoint, WishCarousel};
use crate::core::{
    guard, CardEvent, CardEventHandler, CardEventType, EventLogger, Gate, GateOutcome,
    JourneyTracker, Navigation, PuzzleEngine, Screen, SelectOutcome, SessionState, VisitOutcome,
};
use crate::core::session::format_duration;
use crate::utils::{CardError, CardResult};
use tracing::{info, warn, debug};

/// Owns the session and the per-screen challenge state. Every write to the
/// session goes through this type; the presentation layer only reads it and
/// follows the returned navigation intents.
pub struct GreetingEngine {
    session: SessionState,
    gate: Gate,
    recipient_name: String,
    pack: ContentPack,
    catalog: PhotoCatalog,
    current_screen: Screen,
    puzzle: Option<PuzzleEngine>,
    journey: Option<JourneyTracker>,
    event_log: EventLogger,
}

impl GreetingEngine {
    pub fn new(config: &Config, pack: ContentPack) -> Self {
        let catalog = pack.catalog(config.get_photos_dir());
        let session = SessionState::new();

        info!("Starting greeting session {} with pack '{}'", session.id, pack.id);

        let mut engine = Self {
            gate: Gate::new(&config.gate),
            recipient_name: config.gate.recipient_name.clone(),
            session,
            pack,
            catalog,
            current_screen: Screen::Gate,
            puzzle: None,
            journey: None,
            event_log: EventLogger::default(),
        };
        engine.emit_event(CardEvent::session_started(engine.session.id));
        engine
    }

    /// Shows `requested` if its prerequisite holds, the gate otherwise.
    /// Entering the puzzle deals a fresh board; entering the journey starts
    /// from the first stop. Leaving either screen discards its state.
    pub fn enter(&mut self, requested: Screen) -> Screen {
        let screen = guard(requested, &self.session);
        if screen != requested {
            warn!("Screen '{}' is locked, redirecting to the gate", requested);
            self.emit_event(CardEvent::redirected_to_gate(requested));
        }

        self.puzzle = None;
        self.journey = None;

        match screen {
            Screen::Puzzle => self.deal_puzzle(&mut rand::rng()),
            Screen::Journey => {
                self.journey = Some(JourneyTracker::new(self.pack.waypoints.len()));
            }
            _ => {}
        }

        self.current_screen = screen;
        self.emit_event(CardEvent::screen_entered(screen));
        debug!("Entered screen '{}' at stage {}", screen, self.session.stage());
        screen
    }

    fn deal_puzzle<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        let photo_url = self
            .catalog
            .puzzle_photo(&self.pack.puzzle_photo_ids)
            .map(|photo| self.catalog.url_for(photo))
            .unwrap_or_default();

        let puzzle = PuzzleEngine::shuffled(photo_url, rng);
        self.emit_event(CardEvent::puzzle_dealt(puzzle.photo_url(), puzzle.tiles_home()));
        self.puzzle = Some(puzzle);
    }

    /// Screen matching how far the session has progressed.
    pub fn resume_screen(&self) -> Screen {
        Screen::for_phase(self.session.phase())
    }

    pub fn submit_code(&mut self, input: &str) -> GateOutcome {
        let outcome = self.gate.check(input);

        match &outcome {
            GateOutcome::Accepted => {
                let old_stage = self.session.stage();
                if self.session.pass_gate(self.recipient_name.clone()) {
                    info!("Gate unlocked for {}", self.session.user_name());
                    self.emit_event(CardEvent::gate_accepted(self.session.user_name()));
                    self.emit_event(CardEvent::stage_advanced(old_stage, self.session.stage()));
                }
            }
            GateOutcome::Rejected { .. } => {
                debug!("Rejected unlock code of length {}", input.len());
                self.emit_event(CardEvent::gate_rejected(input.chars().count()));
            }
        }

        outcome
    }

    pub fn select_tile(&mut self, tile_id: usize) -> SelectOutcome {
        if self.current_screen != Screen::Puzzle {
            return SelectOutcome::Ignored;
        }
        let Some(puzzle) = self.puzzle.as_mut() else {
            return SelectOutcome::Ignored;
        };

        let outcome = puzzle.select(tile_id);
        let swap_count = puzzle.swap_count();

        if let SelectOutcome::Swapped { first, second, solved } = outcome {
            self.emit_event(CardEvent::tiles_swapped(first, second, swap_count));
            if solved {
                info!("Puzzle solved in {} swaps", swap_count);
                self.emit_event(CardEvent::puzzle_solved(swap_count));
            }
        }

        outcome
    }

    pub fn continue_from_puzzle(&mut self) -> Navigation {
        let Some(puzzle) = self.puzzle.as_ref() else {
            return Navigation::Stay;
        };

        let old_stage = self.session.stage();
        if !self.session.complete_puzzle(puzzle) {
            return Navigation::Stay;
        }

        self.emit_event(CardEvent::stage_advanced(old_stage, self.session.stage()));
        Navigation::GoTo(Screen::Journey)
    }

    pub fn visit_waypoint(&mut self, index: usize) -> VisitOutcome {
        if self.current_screen != Screen::Journey {
            return VisitOutcome::Rejected;
        }
        let Some(journey) = self.journey.as_mut() else {
            return VisitOutcome::Rejected;
        };

        let outcome = journey.visit(index);
        if let VisitOutcome::Advanced { index, complete } = outcome {
            let name = self
                .pack
                .waypoints
                .get(index)
                .map(|w| w.name.clone())
                .unwrap_or_default();
            debug!("Reached waypoint {} ({})", index, name);
            self.emit_event(CardEvent::waypoint_visited(index, &name));

            if complete {
                info!("Journey complete");
                self.emit_event(CardEvent::journey_completed(self.pack.waypoints.len()));
            }
        }

        outcome
    }

    pub fn continue_from_journey(&mut self) -> Navigation {
        let Some(journey) = self.journey.as_ref() else {
            return Navigation::Stay;
        };

        let old_stage = self.session.stage();
        if !self.session.complete_journey(journey) {
            return Navigation::Stay;
        }

        self.emit_event(CardEvent::stage_advanced(old_stage, self.session.stage()));
        Navigation::GoTo(Screen::Card)
    }

    /// Terminal transition. The flip animation delay is the caller's concern.
    pub fn open_card(&mut self) -> Navigation {
        if self.current_screen != Screen::Card || !self.session.open_card() {
            return Navigation::Stay;
        }

        info!("Card opened for {}", self.session.user_name());
        self.emit_event(CardEvent::card_opened(self.session.user_name()));
        Navigation::GoTo(Screen::Inside)
    }

    pub fn close_card(&self) -> Navigation {
        if self.session.card_opened() {
            Navigation::GoTo(Screen::Farewell)
        } else {
            Navigation::Stay
        }
    }

    pub fn view_photo(&mut self, photo_id: &str) -> CardResult<Photo> {
        let photo = self
            .catalog
            .photo(photo_id)
            .cloned()
            .ok_or_else(|| CardError::photo_not_found(photo_id))?;

        self.emit_event(CardEvent::photo_viewed(&photo.id));
        Ok(photo)
    }

    pub fn record_wish_shown(&mut self, carousel: &WishCarousel) {
        if let Some(wish) = carousel.current() {
            let event = CardEvent::wish_shown(carousel.current_index(), &wish.from);
            self.emit_event(event);
        }
    }

    pub fn wish_carousel(&self, period: Duration) -> WishCarousel {
        WishCarousel::new(self.pack.wishes.clone(), period)
    }

    pub fn card_photos(&self) -> Vec<&Photo> {
        self.catalog.card_photos(&self.pack.card_photo_ids)
    }

    pub fn cover_photo_url(&self) -> String {
        self.catalog.get(&self.pack.cover.photo_id)
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn current_screen(&self) -> Screen {
        self.current_screen
    }

    pub fn puzzle(&self) -> Option<&PuzzleEngine> {
        self.puzzle.as_ref()
    }

    pub fn journey(&self) -> Option<&JourneyTracker> {
        self.journey.as_ref()
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.pack.waypoints
    }

    pub fn pack(&self) -> &ContentPack {
        &self.pack
    }

    pub fn catalog(&self) -> &PhotoCatalog {
        &self.catalog
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    pub fn event_log(&self) -> &EventLogger {
        &self.event_log
    }

    pub fn summary(&self) -> SessionSummary {
        let count = |event_type: CardEventType| self.event_log.get_event_count_by_type(&event_type);

        SessionSummary {
            user_name: self.session.user_name().to_string(),
            stage: self.session.stage(),
            elapsed_seconds: self.session.elapsed_seconds(),
            rejected_codes: count(CardEventType::GateRejected),
            swaps: count(CardEventType::TilesSwapped),
            waypoints_visited: count(CardEventType::WaypointVisited),
            photos_viewed: count(CardEventType::PhotoViewed),
            redirects: count(CardEventType::RedirectedToGate),
        }
    }

    fn emit_event(&mut self, event: CardEvent) {
        self.event_log.handle_event(&event);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub user_name: String,
    pub stage: u32,
    pub elapsed_seconds: i64,
    pub rejected_codes: usize,
    pub swaps: usize,
    pub waypoints_visited: usize,
    pub photos_viewed: usize,
    pub redirects: usize,
}

impl SessionSummary {
    pub fn get_elapsed_formatted(&self) -> String {
        format_duration(self.elapsed_seconds)
    }
}
