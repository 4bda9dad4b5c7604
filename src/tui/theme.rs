//! Color theme for the TUI
//!
//! Board colors can be configured via a `tui_colors.toml` file in the current working
//! directory. Missing keys keep their defaults; an unreadable file is ignored.
//!
//! Example `tui_colors.toml`:
//! ```toml
//! light_square = 200, 180, 150
//! dark_square = 120, 90, 60
//! piece_white = 255, 255, 255
//! piece_black = 30, 30, 30
//! selected = 70, 130, 180
//! destination = 110, 160, 90
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;
use ratatui::style::{Color, Modifier, Style};

use crate::engine::PieceColor;
use crate::game::Severity;

const CONFIG_FILE: &str = "tui_colors.toml";

pub struct Theme {
    pub light_square: Color,
    pub dark_square: Color,
    pub piece_white: Color,
    pub piece_black: Color,
    pub selected: Color,
    pub destination: Color,
    pub border: Color,
    pub text: Color,
    pub info: Color,
    pub success: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            light_square: Color::Rgb(200, 180, 150),
            dark_square: Color::Rgb(120, 90, 60),
            piece_white: Color::Rgb(255, 255, 255),
            piece_black: Color::Rgb(30, 30, 30),
            selected: Color::Rgb(70, 130, 180),
            destination: Color::Rgb(110, 160, 90),
            border: Color::Gray,
            text: Color::White,
            info: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
        }
    }
}

impl Theme {
    /// Defaults overridden by whatever `tui_colors.toml` in the working directory sets.
    pub fn load() -> Self {
        let mut theme = Self::default();
        if let Some(contents) = read_config(Path::new(CONFIG_FILE)) {
            theme.apply(&parse_colors(&contents));
        }
        theme
    }

    fn apply(&mut self, colors: &HashMap<String, Color>) {
        let slots = [
            ("light_square", &mut self.light_square),
            ("dark_square", &mut self.dark_square),
            ("piece_white", &mut self.piece_white),
            ("piece_black", &mut self.piece_black),
            ("selected", &mut self.selected),
            ("destination", &mut self.destination),
        ];
        for (key, slot) in slots {
            if let Some(color) = colors.get(key) {
                *slot = *color;
            }
        }
    }

    /// Style for a square, its piece (if any) and its highlight (if any).
    pub fn square_style(
        &self,
        is_light_square: bool,
        piece_color: Option<PieceColor>,
        highlight: Option<Highlight>,
    ) -> Style {
        let square_bg = match highlight {
            Some(Highlight::Selected) => self.selected,
            Some(Highlight::Destination) => self.destination,
            _ if is_light_square => self.light_square,
            _ => self.dark_square,
        };
        let mut style = Style::default().bg(square_bg);

        style = match piece_color {
            Some(PieceColor::White) => style.fg(self.piece_white).add_modifier(Modifier::BOLD),
            Some(PieceColor::Black) => style.fg(self.piece_black).add_modifier(Modifier::BOLD),
            None => style,
        };

        if highlight == Some(Highlight::Cursor) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn severity_style(&self, severity: Severity) -> Style {
        let color = match severity {
            Severity::Info => self.info,
            Severity::Success => self.success,
            Severity::Error => self.error,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Highlight {
    Cursor,
    Selected,
    Destination,
}

fn read_config(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(contents) => Some(contents),
        Err(error) => {
            debug!("no theme overrides from {}: {}", path.display(), error);
            None
        }
    }
}

/// Parses `key = r, g, b` lines. Brackets around the triple are allowed and `#` starts a
/// comment.
fn parse_colors(contents: &str) -> HashMap<String, Color> {
    let mut colors = HashMap::new();
    for line in contents.lines() {
        let line = line.split('#').next().unwrap_or("").trim();
        let (key, value) = match line.split_once('=') {
            Some(pair) => pair,
            None => continue,
        };

        let rgb_str = value.trim().trim_start_matches('[').trim_end_matches(']');
        let rgb: Option<Vec<u8>> = rgb_str
            .split(',')
            .map(|part| part.trim().parse().ok())
            .collect();
        if let Some(&[r, g, b]) = rgb.as_deref() {
            colors.insert(key.trim().to_string(), Color::Rgb(r, g, b));
        }
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colors() {
        let colors = parse_colors(
            "# board\nlight_square = 1, 2, 3  # pale\ndark_square = [4, 5, 6]\nbroken = 1, 2\n",
        );
        assert_eq!(colors.get("light_square"), Some(&Color::Rgb(1, 2, 3)));
        assert_eq!(colors.get("dark_square"), Some(&Color::Rgb(4, 5, 6)));
        assert!(!colors.contains_key("broken"));
    }

    #[test]
    fn test_unparsable_component_rejects_line() {
        let colors = parse_colors("selected = 1, x, 2, 3\ndestination = 300, 0, 0\n");
        assert!(!colors.contains_key("selected"));
        assert!(!colors.contains_key("destination"));
    }

    #[test]
    fn test_partial_overrides_keep_defaults() {
        let mut theme = Theme::default();
        theme.apply(&parse_colors("selected = 9, 9, 9"));
        assert_eq!(theme.selected, Color::Rgb(9, 9, 9));
        assert_eq!(theme.light_square, Theme::default().light_square);
    }

    #[test]
    fn test_highlight_replaces_square_color() {
        let theme = Theme::default();
        let style = theme.square_style(true, None, Some(Highlight::Destination));
        assert_eq!(style.bg, Some(theme.destination));
        let style = theme.square_style(false, Some(PieceColor::White), Some(Highlight::Cursor));
        assert_eq!(style.bg, Some(theme.dark_square));
        assert!(style.add_modifier.contains(Modifier::REVERSED));
    }
}
