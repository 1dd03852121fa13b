use console::Term;
use std::io::{self, Write};
use crate::ui::ThemeManager;
use crate::content::{CardCover, Photo, Waypoint, Wish};
use crate::core::{JourneyTracker, PuzzleEngine, PuzzleTile, SessionState, SessionSummary};

/// Number of stage increments in a full run.
pub const TOTAL_STAGES: u32 = 3;

pub struct Display {
    term: Term,
    theme_manager: ThemeManager,
    text_width: usize,
}

impl Display {
    pub fn new(theme_manager: ThemeManager, text_width: usize) -> io::Result<Self> {
        Ok(Self {
            term: Term::stdout(),
            theme_manager,
            text_width,
        })
    }

    pub fn clear_screen(&self) -> io::Result<()> {
        self.term.clear_screen()
    }

    pub fn show_title(&self, title: &str) -> io::Result<()> {
        let styled_title = self.theme_manager.apply_style(title, "title");
        let border = "═".repeat(self.text_width);
        let styled_border = self.theme_manager.apply_style(&border, "separator");

        writeln!(io::stdout(), "{}", styled_title)?;
        writeln!(io::stdout(), "{}", styled_border)?;
        writeln!(io::stdout())?;
        Ok(())
    }

    pub fn show_heading(&self, heading: &str) -> io::Result<()> {
        let styled = self.theme_manager.apply_style(heading, "heading");
        writeln!(io::stdout(), "{}", styled)?;

        let underline = "─".repeat(heading.chars().count().min(self.text_width));
        writeln!(io::stdout(), "{}", self.theme_manager.apply_style(&underline, "separator"))?;
        Ok(())
    }

    pub fn show_progress(&self, session: &SessionState) -> io::Result<()> {
        let line = format!(
            "🎁 {} {}/{}",
            progress_bar(session.stage(), TOTAL_STAGES),
            session.stage(),
            TOTAL_STAGES
        );
        writeln!(io::stdout(), "{}", self.theme_manager.apply_style(&line, "progress"))?;
        writeln!(io::stdout())?;
        Ok(())
    }

    pub fn show_puzzle(&self, puzzle: &PuzzleEngine) -> io::Result<()> {
        let border = "+-----".repeat(crate::core::GRID_SIDE) + "+";
        let styled_border = self.theme_manager.apply_style(&border, "separator");

        writeln!(io::stdout(), "{}", styled_border)?;
        for row in puzzle.rows() {
            let mut line = String::from("|");
            for tile in row {
                let style = tile_style(tile, puzzle.selected());
                let cell = self.theme_manager.apply_style(&tile_label(tile, puzzle.selected()), style);
                line.push_str(&cell);
                line.push('|');
            }
            writeln!(io::stdout(), "{}", line)?;
            writeln!(io::stdout(), "{}", styled_border)?;
        }

        let status = format!(
            "{}/{} pieces in place, {} swaps",
            puzzle.tiles_home(),
            puzzle.tiles().len(),
            puzzle.swap_count()
        );
        self.show_message(&status, "info")?;
        writeln!(io::stdout())?;
        Ok(())
    }

    pub fn show_journey(&self, journey: &JourneyTracker, waypoints: &[Waypoint]) -> io::Result<()> {
        for (index, waypoint) in waypoints.iter().enumerate() {
            if index > 0 {
                let leg = leg_marker(&waypoints[index - 1], waypoint, journey.is_leg_travelled(index - 1));
                self.show_message(&format!("   {}", leg), "separator")?;
            }

            let (marker, style) = if journey.is_visited(index) {
                ("●", "waypoint_visited")
            } else if journey.next_index() == Some(index) {
                ("◎", "waypoint_next")
            } else {
                ("○", "waypoint_pending")
            };

            let line = format!(" {} {} ({}h)", marker, waypoint.name, waypoint.distance_hours);
            self.show_message(&line, style)?;
        }
        writeln!(io::stdout())?;

        if let Some(current) = waypoints.get(journey.active_index()) {
            self.show_heading(&format!("Your location: {}", current.name))?;
            self.show_wrapped_text(&current.description, "text")?;
            writeln!(io::stdout())?;
        }
        Ok(())
    }

    pub fn show_card_cover(&self, cover: &CardCover, photo_url: &str) -> io::Result<()> {
        self.show_title(&format!("🎂 🎁  {}  🎈 🎉", cover.title))?;
        self.show_wrapped_text(&cover.subtitle, "text")?;
        if !photo_url.is_empty() {
            self.show_message(&format!("🖼  {}", photo_url), "info")?;
        }
        writeln!(io::stdout())?;
        Ok(())
    }

    pub fn show_wish(&self, wish: &Wish, index: usize, total: usize) -> io::Result<()> {
        self.show_wrapped_text(&format!("“{}”", wish.message), "wish")?;
        self.show_message(&format!("    — {} ({}/{})", wish.from, index + 1, total), "text")?;
        writeln!(io::stdout())?;
        Ok(())
    }

    pub fn show_photo(&self, photo: &Photo, url: &str) -> io::Result<()> {
        let title = match photo.year {
            Some(year) => format!("📷 {} ({})", photo.title, year),
            None => format!("📷 {}", photo.title),
        };
        self.show_heading(&title)?;
        self.show_wrapped_text(&photo.description, "text")?;
        self.show_message(url, "info")?;
        writeln!(io::stdout())?;
        Ok(())
    }

    pub fn show_summary(&self, summary: &SessionSummary) -> io::Result<()> {
        self.show_heading("📊 Your journey")?;
        let lines = [
            format!("Time spent: {}", summary.get_elapsed_formatted()),
            format!("Unlock attempts that missed: {}", summary.rejected_codes),
            format!("Puzzle swaps: {}", summary.swaps),
            format!("Stops visited: {}", summary.waypoints_visited),
            format!("Photos viewed: {}", summary.photos_viewed),
        ];
        for line in &lines {
            self.show_message(line, "info")?;
        }
        writeln!(io::stdout())?;
        Ok(())
    }

    pub fn show_message(&self, message: &str, style: &str) -> io::Result<()> {
        let styled_message = self.theme_manager.apply_style(message, style);
        writeln!(io::stdout(), "{}", styled_message)?;
        Ok(())
    }

    pub fn show_error(&self, error: &str) -> io::Result<()> {
        self.show_message(&format!("❌ {}", error), "error")
    }

    pub fn show_success(&self, message: &str) -> io::Result<()> {
        self.show_message(&format!("✅ {}", message), "success")
    }

    pub fn show_warning(&self, message: &str) -> io::Result<()> {
        self.show_message(&format!("⚠️ {}", message), "warning")
    }

    pub fn show_info(&self, message: &str) -> io::Result<()> {
        self.show_message(message, "info")
    }

    pub fn show_separator(&self) -> io::Result<()> {
        let separator = "━".repeat(self.text_width);
        let styled = self.theme_manager.apply_style(&separator, "separator");
        writeln!(io::stdout(), "{}", styled)?;
        Ok(())
    }

    pub fn wait_for_enter(&self) -> io::Result<()> {
        let styled_prompt = self.theme_manager.apply_style("Press Enter to continue...", "info");
        print!("{}", styled_prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(())
    }

    pub fn show_wrapped_text(&self, text: &str, style: &str) -> io::Result<()> {
        for line in wrap_text(text, self.text_width) {
            let styled_line = self.theme_manager.apply_style(&line, style);
            writeln!(io::stdout(), "{}", styled_line)?;
        }
        Ok(())
    }

    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        self.theme_manager.set_theme(theme_name)
    }

    pub fn get_available_themes(&self) -> Vec<String> {
        self.theme_manager.list_themes()
    }
}

pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        let projected = current_line.chars().count() + word.chars().count() + 1;
        if projected > width && !current_line.is_empty() {
            lines.push(std::mem::take(&mut current_line));
        }

        if !current_line.is_empty() {
            current_line.push(' ');
        }
        current_line.push_str(word);
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }
    lines
}

pub fn progress_bar(stage: u32, total: u32) -> String {
    let filled = stage.min(total) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(total as usize - filled))
}

/// Five-character cell: the tile's 1-based number, bracketed when selected.
pub fn tile_label(tile: &PuzzleTile, selected: Option<usize>) -> String {
    if selected == Some(tile.id) {
        format!("[{:^3}]", tile.id + 1)
    } else {
        format!(" {:^3} ", tile.id + 1)
    }
}

fn tile_style(tile: &PuzzleTile, selected: Option<usize>) -> &'static str {
    if selected == Some(tile.id) {
        "tile_selected"
    } else if tile.is_home() {
        "tile_home"
    } else {
        "tile"
    }
}

fn leg_marker(from: &Waypoint, to: &Waypoint, travelled: bool) -> String {
    let hours = to.distance_hours.saturating_sub(from.distance_hours);
    let (icon, path) = match (to.is_flight, travelled) {
        (true, true) => ("✈", "┆ ┆ ┆"),
        (true, false) => ("✈", "· · ·"),
        (false, true) => ("🚗", "│││││"),
        (false, false) => ("🚗", "·····"),
    };
    format!("{} {} +{}h", path, icon, hours)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_creation() {
        let display = Display::new(ThemeManager::new(), 80);
        assert!(display.is_ok());
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 3), "░░░");
        assert_eq!(progress_bar(2, 3), "██░");
        assert_eq!(progress_bar(5, 3), "███");
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("Distance may separate us, but family bonds remain strong.", 20);
        assert_eq!(lines, vec!["Distance may", "separate us, but", "family bonds remain", "strong."]);
        assert!(wrap_text("", 20).is_empty());
    }

    #[test]
    fn test_tile_label() {
        let tile = PuzzleTile { id: 4, correct_position: 4, current_position: 0 };
        assert_eq!(tile_label(&tile, None), "  5  ");
        assert_eq!(tile_label(&tile, Some(4)), "[ 5 ]");
        assert_eq!(tile_style(&tile, None), "tile");
    }

    #[test]
    fn test_leg_marker() {
        let from = Waypoint {
            id: "munich".into(),
            name: "Munich".into(),
            description: String::new(),
            distance_hours: 31,
            is_flight: false,
        };
        let to = Waypoint {
            id: "toronto".into(),
            name: "Toronto".into(),
            description: String::new(),
            distance_hours: 39,
            is_flight: true,
        };
        assert_eq!(leg_marker(&from, &to, true), "┆ ┆ ┆ ✈ +8h");
    }
}
