//! Stateless UI rendering for the bingo board.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::game::Board;

use super::app::{App, SavedOverlay};

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(15),   // Board
            Constraint::Length(3), // Status
        ])
        .split(area);

    let title = match app.session().pool_name() {
        Some(name) => format!("Tilebingo — {name}"),
        None => "Tilebingo".to_string(),
    };
    let title = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    match app.session().board() {
        Some(board) => draw_board(frame, chunks[1], board, app.cursor()),
        None => {
            let waiting = Paragraph::new("No card yet.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(waiting, chunks[1]);
        }
    }

    let status = Paragraph::new(app.status())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    if let Some(overlay) = app.overlay() {
        draw_saved_overlay(frame, area, overlay);
    }
}

fn draw_board(frame: &mut Frame, area: Rect, board: &Board, cursor: usize) {
    let size = board.size();
    if size == 0 {
        return;
    }

    let row_constraints = vec![Constraint::Ratio(1, size as u32); size];
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(area);

    for (row_index, row_area) in rows.iter().enumerate() {
        let col_constraints = vec![Constraint::Ratio(1, size as u32); size];
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(col_constraints)
            .split(*row_area);

        for (col_index, cell_area) in cols.iter().enumerate() {
            let index = row_index * size + col_index;
            draw_cell(frame, *cell_area, board, cursor, index);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, board: &Board, cursor: usize, index: usize) {
    let Some(cell) = board.get(index) else {
        return;
    };

    let base_style = if cell.is_free() {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if cell.marked() {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let border_style = if index == cursor {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let paragraph = Paragraph::new(cell.label())
        .style(base_style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(border_style));

    frame.render_widget(paragraph, area);
}

fn draw_saved_overlay(frame: &mut Frame, area: Rect, overlay: &SavedOverlay) {
    let popup = center_rect(area, 50, (overlay.cards.len() as u16 + 4).min(20));
    frame.render_widget(Clear, popup);

    let lines: Vec<Line> = overlay
        .cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let style = if i == overlay.cursor {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(card.name().clone(), style))
        })
        .collect();

    let list = Paragraph::new(lines).block(
        Block::default()
            .title("Saved cards (enter loads, esc closes)")
            .borders(Borders::ALL),
    );
    frame.render_widget(list, popup);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
