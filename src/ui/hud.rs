use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::PALETTE;
use crate::game::Game;

const HUD_HEIGHT: u16 = 1;

/// Renders the score row and returns the area left for the play field.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, game: &Game) -> Rect {
    let [score_area, play_area] =
        Layout::vertical([Constraint::Length(HUD_HEIGHT), Constraint::Min(0)]).areas(area);

    frame.render_widget(Paragraph::new(score_line(game.score)), score_area);

    play_area
}

fn score_line(score: u32) -> Line<'static> {
    Line::from(vec![
        Span::styled("Score: ", Style::new().fg(PALETTE.hud_score)),
        Span::styled(
            score.to_string(),
            Style::new()
                .fg(PALETTE.hud_score)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}
