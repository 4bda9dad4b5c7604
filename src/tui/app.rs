//! Main TUI application state and rendering

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::engine::{MoveEngine, Square};
use crate::game::{Frontend, FrontendEvent, MatchController, Overlay, Phase, Side};
use crate::tui::board_widget::BoardWidget;
use crate::tui::keys::{self, HELP};
use crate::tui::Theme;

/// Full-screen terminal frontend. Raw mode and the alternate screen are restored on drop.
pub struct TuiApp {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    theme: Theme,
    cursor: Square,
}

impl TuiApp {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self {
            terminal,
            theme: Theme::load(),
            // e2, the usual first piece to pick up
            cursor: Square::from_rank_file(1, 4),
        })
    }

    fn render_frame<E: MoveEngine>(
        frame: &mut Frame,
        controller: &MatchController<E>,
        theme: &Theme,
        cursor: Square,
    ) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(4)])
            .split(size);

        let board_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        let board_widget = BoardWidget::new(controller.board(), theme)
            .cursor(cursor)
            .selection(controller.selection());
        frame.render_widget(board_widget, board_chunks[0]);

        Self::render_info_panel(frame, board_chunks[1], controller, theme);
        Self::render_status_panel(frame, main_chunks[1], controller, theme);

        if let Some(overlay) = controller.overlay() {
            Self::render_overlay(frame, size, overlay, theme);
        }
    }

    fn render_info_panel<E: MoveEngine>(
        frame: &mut Frame,
        area: Rect,
        controller: &MatchController<E>,
        theme: &Theme,
    ) {
        let mode = controller.mode();
        let phase = match controller.phase() {
            Phase::Idle => "Waiting for a new game",
            Phase::InProgress => "In progress",
            Phase::Finalizing => "Recording result",
        };

        let clock_line = |label: &str, side: Side| {
            let marker = if controller.running_clock() == Some(side) {
                " ◀"
            } else {
                ""
            };
            Line::from(format!(
                "{:<14}{}{}",
                label,
                controller.clock_display(side),
                marker
            ))
        };

        let mut lines = vec![
            Line::from(format!("Mode: {} ({})", mode, mode.time_control())),
            Line::from(format!("Game: {}", phase)),
            Line::from(""),
            clock_line("You (white)", Side::Player),
            clock_line("AI (black)", Side::Opponent),
            Line::from(""),
        ];
        if controller.is_active() {
            let turn = match controller.turn() {
                Side::Player => "Your move",
                Side::Opponent => "AI to move",
            };
            lines.push(Line::from(format!("Turn: {}", turn)));
        }
        if let Some(outcome) = controller.last_outcome() {
            lines.push(Line::from(format!("Last game: {}", outcome)));
        }

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Match")
                    .border_style(theme.border_style()),
            )
            .style(theme.text_style());

        frame.render_widget(paragraph, area);
    }

    fn render_status_panel<E: MoveEngine>(
        frame: &mut Frame,
        area: Rect,
        controller: &MatchController<E>,
        theme: &Theme,
    ) {
        let notification_line = match controller.notification() {
            Some(notification) => Line::from(Span::styled(
                notification.message.clone(),
                theme.severity_style(notification.severity),
            )),
            None => Line::from(Span::styled(HELP, theme.border_style())),
        };
        let lines = vec![
            Line::from(Span::styled(controller.status().to_string(), theme.text_style())),
            notification_line,
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Status")
                    .border_style(theme.border_style()),
            )
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, area);
    }

    fn render_overlay(frame: &mut Frame, area: Rect, overlay: Overlay, theme: &Theme) {
        let popup = centered_rect(area, 40, 5);
        let paragraph = Paragraph::new(vec![
            Line::from(overlay.summary),
            Line::from(""),
            Line::from(overlay.detail),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Game Over")
                .border_style(theme.border_style()),
        )
        .style(theme.text_style());

        frame.render_widget(Clear, popup);
        frame.render_widget(paragraph, popup);
    }
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit if needed.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

impl Frontend for TuiApp {
    fn render<E: MoveEngine>(&mut self, controller: &MatchController<E>) -> io::Result<()> {
        let theme = &self.theme;
        let cursor = self.cursor;
        self.terminal.draw(|f| {
            Self::render_frame(f, controller, theme, cursor);
        })?;
        Ok(())
    }

    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<FrontendEvent>> {
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                return Ok(keys::map_key(key, &mut self.cursor));
            }
        }
        Ok(None)
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 30);
        assert_eq!(centered_rect(area, 40, 5), Rect::new(30, 12, 40, 5));
        let tiny = Rect::new(2, 2, 10, 3);
        assert_eq!(centered_rect(tiny, 40, 5), Rect::new(2, 2, 10, 3));
    }
}
