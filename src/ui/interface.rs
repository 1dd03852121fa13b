use console::Term;
use dialoguer::{FuzzySelect, Password, Select};
use std::future::Future;
use std::time::Duration;
use tokio::task;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};

use crate::config::Config;
use crate::content::{ContentPack, WishCarousel};
use crate::core::{GateOutcome, GreetingEngine, Navigation, Screen, SelectOutcome, VisitOutcome};
use crate::ui::{Display, ThemeManager};
use crate::utils::{CardError, CardResult};
use tracing::{debug, info, warn};

const FLIP_FRAMES: [&str; 4] = ["📕", "📖 .", "📖 . .", "📖 . . ."];
const MIN_WISH_TICK: Duration = Duration::from_millis(100);

/// Terminal front-end. Renders whatever screen the engine allows and feeds
/// the user's choices back into it.
pub struct CardInterface {
    engine: GreetingEngine,
    display: Display,
    config: Config,
}

impl CardInterface {
    pub async fn new(config: Config, pack: ContentPack) -> CardResult<Self> {
        info!("Initializing card interface");

        let theme_manager = ThemeManager::new();
        let mut display = Display::new(theme_manager, config.ui.text_width)
            .map_err(|e| CardError::configuration(format!("Failed to create display: {}", e)))?;

        if !display.set_theme(&config.ui.theme) {
            warn!("Unknown theme '{}', using default", config.ui.theme);
        }

        Ok(Self {
            engine: GreetingEngine::new(&config, pack),
            display,
            config,
        })
    }

    pub fn engine(&self) -> &GreetingEngine {
        &self.engine
    }

    /// Drives the screens until the user quits or leaves the farewell screen.
    pub async fn run(&mut self, start: Screen) -> CardResult<()> {
        let mut screen = self.engine.enter(start);

        loop {
            self.display.clear_screen().ok();
            if self.config.ui.show_progress_header && screen != Screen::Gate {
                self.display.show_progress(self.engine.session())?;
            }

            let next = match screen {
                Screen::Gate => self.gate_screen().await?,
                Screen::Puzzle => self.puzzle_screen().await?,
                Screen::Journey => self.journey_screen().await?,
                Screen::Card => self.card_screen().await?,
                Screen::Inside => self.inside_screen().await?,
                Screen::Farewell => self.farewell_screen().await?,
            };

            match next {
                Some(requested) => screen = self.engine.enter(requested),
                None => break,
            }
        }

        for event in self.engine.event_log().get_recent_events(5) {
            debug!("Recent event {:?} at {}: {}", event.event_type, event.timestamp, event.data);
        }
        info!("Card session {} ended", self.engine.session().id);
        Ok(())
    }

    async fn gate_screen(&mut self) -> CardResult<Option<Screen>> {
        let cover = self.engine.pack().cover.clone();
        self.display.show_title(&format!("🔒 {}", cover.title))?;
        self.display.show_wrapped_text("Enter the secret code to open your card.", "text")?;
        self.display.show_info(&format!("Hint: {} digits", self.engine.gate().secret_len()))?;
        println!();

        loop {
            let code = Password::new()
                .with_prompt("Unlock code")
                .allow_empty_password(true)
                .interact()?;

            match self.engine.submit_code(&code) {
                GateOutcome::Accepted => {
                    self.display
                        .show_success(&format!("Welcome, {}!", self.engine.session().user_name()))?;
                    sleep(Duration::from_millis(self.config.get_animation_delay_ms() * 4)).await;
                    return Ok(Some(self.engine.resume_screen()));
                }
                GateOutcome::Rejected { message } => {
                    self.display.show_error(&message)?;
                }
            }
        }
    }

    async fn puzzle_screen(&mut self) -> CardResult<Option<Screen>> {
        loop {
            let Some(puzzle) = self.engine.puzzle() else {
                return Ok(Some(Screen::Gate));
            };

            self.display.show_heading("🧩 Put the photo back together")?;
            self.display.show_wrapped_text(
                "Pick a piece, then pick the one it should trade places with.",
                "text",
            )?;
            println!();
            self.display.show_puzzle(puzzle)?;

            let solved = puzzle.is_solved();
            let mut choices: Vec<String> = Vec::new();
            let mut tile_ids: Vec<usize> = Vec::new();
            if !solved {
                for tile in puzzle.tiles() {
                    let marker = if puzzle.selected() == Some(tile.id) { " (selected)" } else { "" };
                    choices.push(format!(
                        "Piece {} at row {}, column {}{}",
                        tile.id + 1,
                        tile.current_position / crate::core::GRID_SIDE + 1,
                        tile.current_position % crate::core::GRID_SIDE + 1,
                        marker
                    ));
                    tile_ids.push(tile.id);
                }
            } else {
                choices.push("➡️ Continue".to_string());
            }
            choices.push("🚪 Quit".to_string());

            let selection = Select::new()
                .with_prompt(if solved { "All pieces are home!" } else { "Choose a piece" })
                .items(&choices)
                .default(0)
                .interact()?;

            if selection == choices.len() - 1 {
                return Ok(None);
            }

            if solved {
                if let Navigation::GoTo(next) = self.engine.continue_from_puzzle() {
                    return Ok(Some(next));
                }
                continue;
            }

            let outcome = self.engine.select_tile(tile_ids[selection]);
            self.display.clear_screen().ok();
            if let SelectOutcome::Swapped { solved: true, .. } = outcome {
                self.display.show_success("The photo is whole again!")?;
                if let Some(puzzle) = self.engine.puzzle() {
                    self.display.show_info(puzzle.photo_url())?;
                }
                println!();
            }
        }
    }

    async fn journey_screen(&mut self) -> CardResult<Option<Screen>> {
        loop {
            let Some(journey) = self.engine.journey() else {
                return Ok(Some(Screen::Gate));
            };

            self.display.show_heading("🗺️ Follow the family's journey")?;
            self.display.show_journey(journey, self.engine.waypoints())?;

            let complete = journey.is_complete();
            let mut choices: Vec<String> = self
                .engine
                .waypoints()
                .iter()
                .enumerate()
                .map(|(index, waypoint)| {
                    let marker = if journey.is_visited(index) { "✓" } else { " " };
                    format!("[{}] {}", marker, waypoint.name)
                })
                .collect();
            let waypoint_count = choices.len();
            if complete {
                choices.push("➡️ Continue".to_string());
            }
            choices.push("🚪 Quit".to_string());

            let selection = Select::new()
                .with_prompt("Where to next?")
                .items(&choices)
                .default(journey.next_index().unwrap_or(waypoint_count))
                .interact()?;

            if selection == choices.len() - 1 {
                return Ok(None);
            }

            if selection >= waypoint_count {
                if let Navigation::GoTo(next) = self.engine.continue_from_journey() {
                    return Ok(Some(next));
                }
                continue;
            }

            // Out-of-order stops are ignored without feedback.
            if let VisitOutcome::Rejected = self.engine.visit_waypoint(selection) {
                debug!("Waypoint {} is not the next stop", selection);
            }
            self.display.clear_screen().ok();
        }
    }

    async fn card_screen(&mut self) -> CardResult<Option<Screen>> {
        let cover = self.engine.pack().cover.clone();
        self.display.show_card_cover(&cover, &self.engine.cover_photo_url())?;

        let choices = ["💌 Open the card", "🚪 Quit"];
        let selection = Select::new()
            .with_prompt("Your card is ready")
            .items(&choices)
            .default(0)
            .interact()?;

        if selection == 1 {
            return Ok(None);
        }

        let Navigation::GoTo(next) = self.engine.open_card() else {
            return Ok(Some(Screen::Card));
        };

        self.play_flip().await?;
        Ok(Some(next))
    }

    async fn play_flip(&self) -> CardResult<()> {
        let frame_delay = Duration::from_millis(self.config.get_animation_delay_ms());
        for frame in FLIP_FRAMES {
            self.display.show_message(frame, "title")?;
            sleep(frame_delay).await;
        }
        sleep(Duration::from_millis(self.config.timing.card_open_delay_ms)).await;
        Ok(())
    }

    async fn inside_screen(&mut self) -> CardResult<Option<Screen>> {
        let shown_at = Instant::now();
        let mut carousel = self
            .engine
            .wish_carousel(Duration::from_secs(self.config.timing.wish_cycle_secs));
        self.engine.record_wish_shown(&carousel);

        loop {
            if carousel.advance_to(shown_at.elapsed()) {
                self.engine.record_wish_shown(&carousel);
            }
            self.display.clear_screen().ok();
            show_inside(&self.display, &self.engine, &carousel)?;

            // The key wait runs off the runtime so the wish timer keeps ticking.
            let key_press = task::spawn_blocking(|| Term::stdout().read_key());
            let display = &self.display;
            let engine = &mut self.engine;
            let key = rotate_wishes_until(key_press, &mut carousel, shown_at, |carousel| {
                display.clear_screen().ok();
                show_inside(display, engine, carousel)?;
                engine.record_wish_shown(carousel);
                Ok(())
            })
            .await?;
            key.map_err(|e| CardError::interaction(format!("Key input task failed: {}", e)))??;

            let choices = ["💭 Next wish", "📷 Photo album", "📕 Close the card"];
            let selection = Select::new()
                .with_prompt("What would you like to do?")
                .items(&choices)
                .default(0)
                .interact()?;

            match selection {
                0 => {
                    carousel.next();
                    self.engine.record_wish_shown(&carousel);
                }
                1 => self.photo_album().await?,
                _ => {
                    if let Navigation::GoTo(next) = self.engine.close_card() {
                        return Ok(Some(next));
                    }
                }
            }
        }
    }

    async fn photo_album(&mut self) -> CardResult<()> {
        loop {
            let photos: Vec<(String, String)> = self
                .engine
                .card_photos()
                .into_iter()
                .map(|photo| (photo.id.clone(), photo.title.clone()))
                .collect();

            if photos.is_empty() {
                self.display.show_warning("The album is empty.")?;
                self.display.wait_for_enter()?;
                return Ok(());
            }

            let mut choices: Vec<String> = photos.iter().map(|(_, title)| title.clone()).collect();
            choices.push("🔙 Back to the card".to_string());

            let selection = FuzzySelect::new()
                .with_prompt("Choose a photo")
                .items(&choices)
                .default(0)
                .interact()?;

            let Some((photo_id, _)) = photos.get(selection) else {
                return Ok(());
            };

            let photo = self.engine.view_photo(photo_id)?;
            let url = self.engine.catalog().url_for(&photo);
            self.display.clear_screen().ok();
            self.display.show_photo(&photo, &url)?;
            self.display.wait_for_enter()?;
        }
    }

    async fn farewell_screen(&mut self) -> CardResult<Option<Screen>> {
        let name = self.engine.session().user_name().to_string();
        self.display.show_title(&format!("💝 Thank you, {}!", name))?;
        self.display.show_wrapped_text(
            "With love from all of us, near and far. Happy Birthday!",
            "wish",
        )?;
        println!();

        let summary = self.engine.summary();
        self.display.show_summary(&summary)?;
        self.display.show_separator()?;
        Ok(None)
    }
}

fn show_inside(display: &Display, engine: &GreetingEngine, carousel: &WishCarousel) -> CardResult<()> {
    let cover = &engine.pack().cover;
    display.show_title(&format!("🎉 {}, {}", cover.title, engine.session().user_name()))?;

    if let Some(wish) = carousel.current() {
        display.show_wish(wish, carousel.current_index(), carousel.len())?;
    }
    display.show_info("Press any key for options...")?;
    Ok(())
}

/// Waits for `prompt` while the carousel follows the clock. `on_rotate` runs
/// each time the shown wish changes. The timer lives only as long as this call.
async fn rotate_wishes_until<F, R>(
    prompt: F,
    carousel: &mut WishCarousel,
    shown_at: Instant,
    mut on_rotate: R,
) -> CardResult<F::Output>
where
    F: Future,
    R: FnMut(&WishCarousel) -> CardResult<()>,
{
    let period = carousel.period().max(MIN_WISH_TICK);
    let mut ticker = interval_at(shown_at + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(prompt);

    loop {
        tokio::select! {
            output = &mut prompt => return Ok(output),
            _ = ticker.tick() => {
                if carousel.advance_to(shown_at.elapsed()) {
                    on_rotate(carousel)?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::default_pack;

    #[tokio::test]
    async fn test_interface_creation() {
        let interface = CardInterface::new(Config::default(), default_pack()).await.unwrap();
        assert_eq!(interface.engine().current_screen(), Screen::Gate);
        assert_eq!(interface.engine().session().stage(), 0);
    }

    #[tokio::test]
    async fn test_unknown_theme_falls_back() {
        let mut config = Config::default();
        config.ui.theme = "neon".to_string();

        let interface = CardInterface::new(config, default_pack()).await;
        assert!(interface.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wishes_rotate_without_input() {
        let mut carousel = WishCarousel::new(default_pack().wishes, Duration::from_secs(10));
        let shown_at = Instant::now();
        let mut shown = Vec::new();

        rotate_wishes_until(sleep(Duration::from_secs(25)), &mut carousel, shown_at, |carousel| {
            shown.push(carousel.current_index());
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(shown, vec![1, 2]);
        assert_eq!(carousel.current_index(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rotation_stops_when_prompt_returns() {
        let mut carousel = WishCarousel::new(default_pack().wishes, Duration::from_secs(10));
        let shown_at = Instant::now();
        let mut rotations = 0;

        let key = rotate_wishes_until(async { 'q' }, &mut carousel, shown_at, |_| {
            rotations += 1;
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(key, 'q');
        sleep(Duration::from_secs(30)).await;
        assert_eq!(rotations, 0);
        assert_eq!(carousel.current_index(), 0);
    }

    #[tokio::test]
    async fn test_flip_waits_for_open_delay() {
        let mut config = Config::default();
        config.timing.animation_speed = crate::config::AnimationSpeed::None;
        let interface = CardInterface::new(config, default_pack()).await.unwrap();

        let started = Instant::now();
        interface.play_flip().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }
}
