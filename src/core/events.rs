use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use crate::core::Screen;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardEvent {
    pub id: Uuid,
    pub event_type: CardEventType,
    pub timestamp: DateTime<Utc>,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEventType {
    SessionStarted,
    ScreenEntered,
    RedirectedToGate,
    GateAccepted,
    GateRejected,
    PuzzleDealt,
    TilesSwapped,
    PuzzleSolved,
    WaypointVisited,
    JourneyCompleted,
    StageAdvanced,
    CardOpened,
    PhotoViewed,
    WishShown,
}

impl CardEvent {
    pub fn new(event_type: CardEventType, data: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            timestamp: Utc::now(),
            data,
        }
    }

    pub fn session_started(session_id: Uuid) -> Self {
        Self::new(CardEventType::SessionStarted, serde_json::json!({
            "session_id": session_id
        }))
    }

    pub fn screen_entered(screen: Screen) -> Self {
        Self::new(CardEventType::ScreenEntered, serde_json::json!({
            "screen": screen.name()
        }))
    }

    pub fn redirected_to_gate(requested: Screen) -> Self {
        Self::new(CardEventType::RedirectedToGate, serde_json::json!({
            "requested": requested.name()
        }))
    }

    pub fn gate_accepted(user_name: &str) -> Self {
        Self::new(CardEventType::GateAccepted, serde_json::json!({
            "user_name": user_name
        }))
    }

    pub fn gate_rejected(attempt_length: usize) -> Self {
        Self::new(CardEventType::GateRejected, serde_json::json!({
            "attempt_length": attempt_length
        }))
    }

    pub fn puzzle_dealt(photo_url: &str, tiles_home: usize) -> Self {
        Self::new(CardEventType::PuzzleDealt, serde_json::json!({
            "photo_url": photo_url,
            "tiles_home": tiles_home
        }))
    }

    pub fn tiles_swapped(first: usize, second: usize, swap_count: u32) -> Self {
        Self::new(CardEventType::TilesSwapped, serde_json::json!({
            "first": first,
            "second": second,
            "swap_count": swap_count
        }))
    }

    pub fn puzzle_solved(swap_count: u32) -> Self {
        Self::new(CardEventType::PuzzleSolved, serde_json::json!({
            "swap_count": swap_count
        }))
    }

    pub fn waypoint_visited(index: usize, name: &str) -> Self {
        Self::new(CardEventType::WaypointVisited, serde_json::json!({
            "index": index,
            "name": name
        }))
    }

    pub fn journey_completed(waypoints: usize) -> Self {
        Self::new(CardEventType::JourneyCompleted, serde_json::json!({
            "waypoints": waypoints
        }))
    }

    pub fn stage_advanced(old_stage: u32, new_stage: u32) -> Self {
        Self::new(CardEventType::StageAdvanced, serde_json::json!({
            "old_stage": old_stage,
            "new_stage": new_stage
        }))
    }

    pub fn card_opened(user_name: &str) -> Self {
        Self::new(CardEventType::CardOpened, serde_json::json!({
            "user_name": user_name
        }))
    }

    pub fn photo_viewed(photo_id: &str) -> Self {
        Self::new(CardEventType::PhotoViewed, serde_json::json!({
            "photo_id": photo_id
        }))
    }

    pub fn wish_shown(index: usize, from: &str) -> Self {
        Self::new(CardEventType::WishShown, serde_json::json!({
            "index": index,
            "from": from
        }))
    }
}

pub trait CardEventHandler {
    fn handle_event(&mut self, event: &CardEvent);
}

/// Bounded in-memory history; the oldest entries fall off first.
#[derive(Debug, Clone)]
pub struct EventLogger {
    events: Vec<CardEvent>,
    max_events: usize,
}

impl EventLogger {
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    pub fn get_events(&self) -> &[CardEvent] {
        &self.events
    }

    pub fn get_recent_events(&self, count: usize) -> Vec<&CardEvent> {
        self.events
            .iter()
            .rev()
            .take(count)
            .collect()
    }

    pub fn export_events(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.events)
    }

    pub fn get_event_count(&self) -> usize {
        self.events.len()
    }

    pub fn get_event_count_by_type(&self, event_type: &CardEventType) -> usize {
        self.events
            .iter()
            .filter(|event| &event.event_type == event_type)
            .count()
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl CardEventHandler for EventLogger {
    fn handle_event(&mut self, event: &CardEvent) {
        self.events.push(event.clone());

        if self.events.len() > self.max_events {
            self.events.remove(0);
        }
    }
}
