use super::consts;
use super::util::center_rect;
use gridsnake::engine::{Grid, Position, Snapshot};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::Line,
    widgets::Widget,
};

/// Draws a [`Snapshot`] of the game: score bar, playing field, and (once the
/// game is over) the final score.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct View<'a> {
    pub(crate) snapshot: &'a Snapshot,
    pub(crate) grid: Grid,
}

impl Widget for View<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [score_area, field_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        Line::styled(
            format!(" Score: {}", self.snapshot.score),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let border_size = Size {
            width: self
                .grid
                .cols()
                .saturating_mul(consts::CELL_WIDTH)
                .saturating_add(2),
            height: self.grid.rows().saturating_add(2),
        };
        let border_area = center_rect(field_area, border_size);
        DottedBorder.render(border_area, buf);

        let mut canvas = Canvas {
            area: border_area.inner(Margin::new(1, 1)),
            grid: self.grid,
            buf,
        };
        for &pos in &self.snapshot.obstacles {
            canvas.draw_cell(pos, consts::OBSTACLE_SYMBOL, consts::OBSTACLE_STYLE);
        }
        canvas.draw_cell(
            self.snapshot.food,
            consts::FOOD_SYMBOL,
            consts::FOOD_STYLE,
        );
        for &pos in &self.snapshot.body {
            canvas.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if self.snapshot.game_over {
            canvas.draw_cell(
                self.snapshot.head,
                consts::COLLISION_SYMBOL,
                consts::COLLISION_STYLE,
            );
            Line::from(format!(" Game Over. Your Score: {}", self.snapshot.score))
                .render(msg1_area, buf);
            Line::from(" Restart (r) or Quit (q)").render(msg2_area, buf);
        } else {
            canvas.draw_cell(
                self.snapshot.head,
                consts::SNAKE_HEAD_SYMBOL,
                consts::SNAKE_STYLE,
            );
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    grid: Grid,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    /// Fill the terminal cells for the grid cell at `pos`.  Anything off the
    /// grid or outside the canvas is skipped.
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let Some((col, row)) = self.grid.cell_of(pos) else {
            return;
        };
        let Some(y) = self
            .area
            .y
            .checked_add(row)
            .filter(|&y| y < self.area.bottom())
        else {
            return;
        };
        let Some(x0) = col
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|dx| self.area.x.checked_add(dx))
        else {
            return;
        };
        let x1 = x0
            .saturating_add(consts::CELL_WIDTH)
            .min(self.area.right());
        for x in x0..x1 {
            if let Some(cell) = self.buf.cell_mut((x, y)) {
                cell.set_char(symbol);
                cell.set_style(Style::reset().patch(style));
            }
        }
    }
}

/// A border drawn with dots, marking edges that the snake passes through
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let (left, top) = (area.x, area.y);
        let right = area.right().saturating_sub(1);
        let bottom = area.bottom().saturating_sub(1);
        for pos in [(left, top), (right, top), (right, bottom), (left, bottom)] {
            set_char(buf, pos, '·');
        }
        for x in (left + 1)..right {
            set_char(buf, (x, top), '⋯');
            set_char(buf, (x, bottom), '⋯');
        }
        for y in (top + 1)..bottom {
            set_char(buf, (left, y), '⋮');
            set_char(buf, (right, y), '⋮');
        }
    }
}

fn set_char(buf: &mut Buffer, pos: (u16, u16), symbol: char) {
    if let Some(cell) = buf.cell_mut(pos) {
        cell.set_char(symbol);
    }
}
