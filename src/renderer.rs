use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{BORDER_HALF_BLOCK, DisplayConfig, GLYPH_CELL, GridSize, PALETTE};
use crate::food::ColorTag;
use crate::game::Game;
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::render_game_over_menu;

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, game: &Game, display: &DisplayConfig) {
    let area = frame.area();
    let remaining = render_hud(frame, area, game);
    let play_area = play_field_rect(remaining, game.bounds(), display.cell_width);

    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(PALETTE.border_fg))
        .style(Style::new().bg(PALETTE.play_bg));

    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    let layout = CellLayout {
        inner,
        bounds: game.bounds(),
        cell_width: display.cell_width,
    };
    let buffer = frame.buffer_mut();
    render_food(buffer, &layout, game);
    render_snake(buffer, &layout, game);

    if let Some(reason) = game.end_reason() {
        render_game_over_menu(frame, play_area, game.score, reason);
    }
}

/// Bordered rectangle just large enough for the grid, clipped to `area`.
fn play_field_rect(area: Rect, bounds: GridSize, cell_width: u16) -> Rect {
    let width = bounds.width.saturating_mul(cell_width).saturating_add(2);
    let height = bounds.height.saturating_add(2);

    Rect {
        x: area.x,
        y: area.y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Maps grid cells onto terminal cells inside the play field.
struct CellLayout {
    inner: Rect,
    bounds: GridSize,
    cell_width: u16,
}

impl CellLayout {
    fn to_terminal(&self, position: Position) -> Option<(u16, u16)> {
        if !position.is_within_bounds(self.bounds) {
            return None;
        }

        let x_offset = u16::try_from(position.x).ok()?.checked_mul(self.cell_width)?;
        let y_offset = u16::try_from(position.y).ok()?;

        let x = self.inner.x.saturating_add(x_offset);
        let y = self.inner.y.saturating_add(y_offset);
        if x >= self.inner.right() || y >= self.inner.bottom() {
            return None;
        }

        Some((x, y))
    }

    fn fill(&self, buffer: &mut Buffer, position: Position, style: Style) {
        let Some((x, y)) = self.to_terminal(position) else {
            return;
        };

        let columns = self.cell_width.min(self.inner.right() - x);
        for column in 0..columns {
            buffer.set_string(x + column, y, GLYPH_CELL, style);
        }
    }
}

fn render_food(buffer: &mut Buffer, layout: &CellLayout, game: &Game) {
    let food = game.food;
    let style = Style::new().fg(food_color(food.color_tag()));
    let size = i32::from(food.size());

    // Special food draws its whole footprint; only the anchor is edible.
    for dy in 0..size {
        for dx in 0..size {
            let cell = Position::new(food.position.x + dx, food.position.y + dy);
            layout.fill(buffer, cell, style);
        }
    }
}

fn render_snake(buffer: &mut Buffer, layout: &CellLayout, game: &Game) {
    let body_style = Style::new().fg(PALETTE.snake_body);
    for segment in game.snake.segments().skip(1) {
        layout.fill(buffer, *segment, body_style);
    }

    let head_style = Style::new()
        .fg(PALETTE.snake_head)
        .add_modifier(Modifier::BOLD);
    layout.fill(buffer, game.snake.head(), head_style);
}

fn food_color(tag: ColorTag) -> Color {
    match tag {
        ColorTag::Red => PALETTE.food_red,
        ColorTag::Blue => PALETTE.food_blue,
    }
}
