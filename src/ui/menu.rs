use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::PALETTE;
use crate::game::EndReason;

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(frame: &mut Frame<'_>, area: Rect, score: u32, reason: EndReason) {
    let popup = centered_popup(area, 70, 40);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("GAME OVER"))
            .alignment(Alignment::Center)
            .style(
                Style::new()
                    .fg(PALETTE.game_over_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let lines = vec![
        Line::from(format!("Score: {score}")),
        Line::from(reason_text(reason)),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("Press any key to exit"))
            .alignment(Alignment::Center)
            .style(Style::new().fg(PALETTE.menu_footer)),
        footer_row,
    );
}

fn reason_text(reason: EndReason) -> &'static str {
    match reason {
        EndReason::WallCollision => "Cause: hit wall",
        EndReason::SelfCollision => "Cause: hit yourself",
        EndReason::BoardFilled => "The board is full!",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
