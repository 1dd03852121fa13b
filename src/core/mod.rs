pub mod engine;
pub mod events;
pub mod gate;
pub mod journey;
pub mod navigation;
pub mod puzzle;
pub mod session;

pub use engine::{GreetingEngine, SessionSummary};
pub use events::{CardEvent, CardEventHandler, CardEventType, EventLogger};
pub use gate::{Gate, GateOutcome};
pub use journey::{JourneyTracker, VisitOutcome};
pub use navigation::{guard, Navigation, Screen};
pub use puzzle::{PuzzleEngine, PuzzleTile, SelectOutcome, GRID_SIDE, TILE_COUNT};
pub use session::{Phase, SessionState};
