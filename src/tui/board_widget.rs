//! Chess board widget for TUI rendering

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Widget},
};

use crate::engine::{BoardSnapshot, Square};
use crate::game::Selection;
use crate::tui::theme::{Highlight, Theme};

/// Renders the board from White's side, with the keyboard cursor, the selected piece and its
/// legal destinations highlighted.
pub struct BoardWidget<'a> {
    board: &'a BoardSnapshot,
    theme: &'a Theme,
    cursor: Option<Square>,
    selection: Option<&'a Selection>,
}

impl<'a> BoardWidget<'a> {
    pub fn new(board: &'a BoardSnapshot, theme: &'a Theme) -> Self {
        Self {
            board,
            theme,
            cursor: None,
            selection: None,
        }
    }

    pub fn cursor(mut self, cursor: Square) -> Self {
        self.cursor = Some(cursor);
        self
    }

    pub fn selection(mut self, selection: Option<&'a Selection>) -> Self {
        self.selection = selection;
        self
    }

    fn highlight(&self, square: Square) -> Option<Highlight> {
        if self.cursor == Some(square) {
            return Some(Highlight::Cursor);
        }
        let selection = self.selection?;
        if selection.square == square {
            Some(Highlight::Selected)
        } else if selection.allows(square) {
            Some(Highlight::Destination)
        } else {
            None
        }
    }
}

fn put_char(buf: &mut Buffer, area: Rect, x: u16, y: u16, ch: char, style: Style) {
    if x < area.x + area.width && y < area.y + area.height {
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_char(ch).set_style(style);
        }
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Board")
            .border_style(self.theme.border_style());

        let inner = block.inner(area);
        block.render(area, buf);

        // 1 column for rank labels, 2 rows for file labels
        let available_width = inner.width.saturating_sub(1);
        let available_height = inner.height.saturating_sub(2);
        let square_width = (available_width / 8).clamp(2, 6);
        let square_height = (available_height / 8).clamp(1, 3);

        let text_style = self.theme.text_style();
        let bottom_label_y = inner.y + 1 + 8 * square_height;
        for file in 0u8..8 {
            let x = inner.x + 1 + u16::from(file) * square_width + square_width / 2;
            let label = (b'a' + file) as char;
            put_char(buf, inner, x, inner.y, label, text_style);
            put_char(buf, inner, x, bottom_label_y, label, text_style);
        }

        for row in 0u8..8 {
            let rank = 7 - row;
            let y = inner.y + 1 + u16::from(row) * square_height;
            put_char(
                buf,
                inner,
                inner.x,
                y + square_height / 2,
                (b'1' + rank) as char,
                text_style,
            );

            for file in 0u8..8 {
                let square = Square::from_rank_file(rank, file);
                let x = inner.x + 1 + u16::from(file) * square_width;
                if x + square_width > inner.x + inner.width {
                    continue;
                }

                let is_light = (rank + file) % 2 == 1;
                let piece = self.board.get(square);
                let piece_char = piece.map_or(' ', |piece| piece.to_unicode_piece_char());
                let style = self.theme.square_style(
                    is_light,
                    piece.map(|piece| piece.color),
                    self.highlight(square),
                );

                for dy in 0..square_height {
                    for dx in 0..square_width {
                        let is_center = dx == square_width / 2 && dy == square_height / 2;
                        let ch = if is_center { piece_char } else { ' ' };
                        put_char(buf, inner, x + dx, y + dy, ch, style);
                    }
                }
            }
        }
    }
}
