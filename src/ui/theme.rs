use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: HashMap<String, ColorConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    pub foreground: Option<String>,
    pub style: Vec<String>,
}

impl ColorConfig {
    fn new(foreground: &str, style: &str) -> Self {
        Self {
            foreground: Some(foreground.to_string()),
            style: style.split_whitespace().map(str::to_string).collect(),
        }
    }
}

impl Theme {
    fn from_table(name: &str, table: &[(&str, &str, &str)]) -> Self {
        let colors = table
            .iter()
            .map(|(key, fg, style)| (key.to_string(), ColorConfig::new(fg, style)))
            .collect();

        Self {
            name: name.to_string(),
            colors,
        }
    }
}

pub struct ThemeManager {
    themes: HashMap<String, Theme>,
    current_theme: String,
}

impl ThemeManager {
    pub fn new() -> Self {
        let mut manager = Self {
            themes: HashMap::new(),
            current_theme: "default".to_string(),
        };

        manager.load_default_themes();
        manager
    }

    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        if self.themes.contains_key(theme_name) {
            self.current_theme = theme_name.to_string();
            true
        } else {
            false
        }
    }

    pub fn current_theme_name(&self) -> &str {
        &self.current_theme
    }

    pub fn apply_style(&self, text: &str, style_name: &str) -> String {
        let Some(color_config) = self
            .themes
            .get(&self.current_theme)
            .and_then(|theme| theme.colors.get(style_name))
        else {
            return text.to_string();
        };

        let mut styled = match color_config.foreground.as_deref().and_then(parse_color) {
            Some(color) => text.color(color),
            None => text.normal(),
        };

        for style in &color_config.style {
            styled = match style.as_str() {
                "bold" => styled.bold(),
                "italic" => styled.italic(),
                "underline" => styled.underline(),
                "dimmed" => styled.dimmed(),
                "reversed" => styled.reversed(),
                _ => styled,
            };
        }

        styled.to_string()
    }

    pub fn list_themes(&self) -> Vec<String> {
        let mut names: Vec<String> = self.themes.keys().cloned().collect();
        names.sort();
        names
    }

    fn load_default_themes(&mut self) {
        let default = Theme::from_table("default", &[
            ("title", "magenta", "bold"),
            ("heading", "blue", "bold"),
            ("text", "white", ""),
            ("tile", "cyan", ""),
            ("tile_home", "green", "bold"),
            ("tile_selected", "yellow", "bold reversed"),
            ("waypoint_visited", "green", "bold"),
            ("waypoint_next", "yellow", "bold"),
            ("waypoint_pending", "bright_black", "dimmed"),
            ("wish", "bright_magenta", "italic"),
            ("progress", "yellow", ""),
            ("error", "red", "bold"),
            ("success", "green", "bold"),
            ("warning", "yellow", "bold"),
            ("info", "blue", ""),
            ("separator", "bright_black", "dimmed"),
        ]);

        let dark = Theme::from_table("dark", &[
            ("title", "bright_magenta", "bold"),
            ("heading", "bright_blue", "bold"),
            ("text", "bright_white", ""),
            ("tile", "bright_cyan", ""),
            ("tile_home", "bright_green", "bold"),
            ("tile_selected", "bright_yellow", "bold reversed"),
            ("waypoint_visited", "bright_green", "bold"),
            ("waypoint_next", "bright_yellow", "bold"),
            ("waypoint_pending", "white", "dimmed"),
            ("wish", "bright_magenta", "italic"),
            ("progress", "bright_yellow", ""),
            ("error", "bright_red", "bold"),
            ("success", "bright_green", "bold"),
        ]);

        // Soft palette after the card's original look.
        let pastel = Theme::from_table("pastel", &[
            ("title", "bright_red", "bold"),
            ("heading", "bright_magenta", "bold"),
            ("text", "white", ""),
            ("tile", "bright_blue", ""),
            ("tile_home", "bright_cyan", "bold"),
            ("tile_selected", "bright_yellow", "reversed"),
            ("waypoint_visited", "bright_cyan", "bold"),
            ("waypoint_next", "bright_red", "bold"),
            ("waypoint_pending", "bright_black", ""),
            ("wish", "bright_magenta", "italic"),
            ("separator", "bright_black", ""),
        ]);

        for theme in [default, dark, pastel] {
            self.themes.insert(theme.name.clone(), theme);
        }
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_color(color_name: &str) -> Option<Color> {
    match color_name.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "bright_black" => Some(Color::BrightBlack),
        "bright_red" => Some(Color::BrightRed),
        "bright_green" => Some(Color::BrightGreen),
        "bright_yellow" => Some(Color::BrightYellow),
        "bright_blue" => Some(Color::BrightBlue),
        "bright_magenta" => Some(Color::BrightMagenta),
        "bright_cyan" => Some(Color::BrightCyan),
        "bright_white" => Some(Color::BrightWhite),
        _ => None,
    }
}
