//! Terminal User Interface (TUI) for playing a timed match

pub mod app;
pub mod board_widget;
pub mod keys;
pub mod theme;

pub use app::TuiApp;
pub use theme::Theme;
