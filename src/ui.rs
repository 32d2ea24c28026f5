//! Terminal UI rendering with ratatui

use crate::board::{Cell, BOARD_HEIGHT, BOARD_WIDTH};
use crate::game::Game;
use crate::menu::{Menu, MenuItem};
use crate::score::HighScores;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const BLOCK: &str = "██";
const EMPTY: &str = "  ";

/// Board box (2 columns per cell) plus the side panel
const GAME_WIDTH: u16 = (BOARD_WIDTH as u16) * 2 + 2 + 16;
const GAME_HEIGHT: u16 = (BOARD_HEIGHT as u16) + 2;

/// Render the main menu
pub fn render_menu(frame: &mut Frame, menu: &Menu, best: Option<u32>) {
    let area = frame.area();
    let menu_area = center_rect(area, 40, 16);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(8)])
        .split(menu_area);

    let mut title_lines = vec![
        Line::raw(""),
        Line::styled("T E R M T R I S", Style::default().fg(Color::Cyan).bold()),
    ];
    if let Some(best) = best.filter(|&b| b > 0) {
        title_lines.push(Line::styled(
            format!("Best: {}", best),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let title = Paragraph::new(title_lines).alignment(Alignment::Center);
    frame.render_widget(title, layout[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(layout[1]);
    frame.render_widget(block, layout[1]);

    let mut lines = Vec::new();
    lines.push(Line::raw(""));
    for (i, item) in MenuItem::all().iter().enumerate() {
        let line = if i == menu.selected {
            Line::styled(
                format!("▶ {}", item.label()),
                Style::default().fg(Color::Yellow).bold(),
            )
        } else {
            Line::styled(format!("  {}", item.label()), Style::default().fg(Color::White))
        };
        lines.push(line);
        lines.push(Line::raw(""));
    }
    lines.push(Line::styled(
        "↑↓ Select  Enter Confirm  q Quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render the game view: board, next-piece preview and stats
pub fn render_game(frame: &mut Frame, game: &Game) {
    let area = frame.area();
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((BOARD_WIDTH as u16) * 2 + 2),
            Constraint::Length(16),
        ])
        .split(game_area);

    render_board(frame, main_layout[0], game);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(6)])
        .split(main_layout[1]);

    render_next(frame, right_layout[0], game);
    render_stats(frame, right_layout[1], game);
}

/// Render the board with the falling piece overlaid
fn render_board(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .title(" TERMTRIS ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let piece = game.current_piece();
    let mut lines: Vec<Line> = Vec::with_capacity(BOARD_HEIGHT);

    for (y, row) in game.board.rows().enumerate() {
        let mut spans = Vec::with_capacity(BOARD_WIDTH);
        for (x, cell) in row.iter().enumerate() {
            // The falling piece covers the board cell underneath it
            let px = x as i32 - piece.x;
            let py = y as i32 - piece.y;
            let piece_color = (px >= 0
                && py >= 0
                && (px as usize) < piece.width
                && (py as usize) < piece.width
                && piece.is_set(py as usize, px as usize))
            .then(|| piece.kind.color());

            let span = match (piece_color, cell) {
                (Some(color), _) => Span::styled(BLOCK, Style::default().fg(color)),
                (None, Cell::Filled(kind)) => {
                    Span::styled(BLOCK, Style::default().fg(kind.color()))
                }
                (None, Cell::Empty) => Span::raw(EMPTY),
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the next-piece preview box
fn render_next(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let next = game.next_piece();
    let color = next.kind.color();
    let mut lines = vec![Line::raw("")];
    for row in 0..next.width {
        let mut spans = Vec::with_capacity(next.width);
        for col in 0..next.width {
            if next.is_set(row, col) {
                spans.push(Span::styled(BLOCK, Style::default().fg(color)));
            } else {
                spans.push(Span::raw(EMPTY));
            }
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render the score/speed/blocks panel
fn render_stats(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .title(" STATS ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled("Score  ", Style::default().fg(Color::Gray)),
            Span::styled(
                game.score().to_string(),
                Style::default().fg(Color::Yellow).bold(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Speed  ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{}ms", game.fall_interval().as_millis())),
        ]),
        Line::from(vec![
            Span::styled("Blocks ", Style::default().fg(Color::Gray)),
            Span::raw(game.blocks().to_string()),
        ]),
        Line::raw(""),
        Line::styled("h Help  q Menu", Style::default().fg(Color::DarkGray)),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the help popup over whatever is underneath
pub fn render_help(frame: &mut Frame) {
    let area = center_rect(frame.area(), 40, 14);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let controls = [
        ("←/→", "Move left / right"),
        ("↓", "Soft drop"),
        ("↑", "Rotate"),
        ("Space", "Hard drop"),
        ("s", "Pin falling speed"),
        ("h", "Help"),
        ("q", "Back to menu"),
    ];

    let mut lines = vec![Line::raw("")];
    for (key, what) in controls {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>7}", key), Style::default().fg(Color::Yellow)),
            Span::raw(format!("  {}", what)),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Press any key to go back",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render the high-score popup
pub fn render_high_scores(frame: &mut Frame, scores: &HighScores) {
    let area = center_rect(frame.area(), 36, 16);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" High Scores ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::raw("")];
    for (i, entry) in scores.entries.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(Color::Gray)),
            Span::raw(format!("{:<12}", entry.name)),
            Span::styled(
                format!("{:>8}", entry.score),
                Style::default().fg(Color::Yellow),
            ),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Press any key to go back",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render the game-over overlay, with name entry when the score qualifies
pub fn render_game_over(
    frame: &mut Frame,
    score: u32,
    name: Option<&str>,
    error: Option<&str>,
) {
    let area = center_rect(frame.area(), 40, 10);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Game Over ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw("Score: "),
            Span::styled(score.to_string(), Style::default().fg(Color::Yellow).bold()),
        ]),
        Line::raw(""),
    ];

    match name {
        Some(name) => {
            lines.push(Line::styled(
                "New high score!",
                Style::default().fg(Color::Green).bold(),
            ));
            lines.push(Line::from(vec![
                Span::raw("Name: "),
                Span::styled(name.to_string(), Style::default().fg(Color::Green)),
                Span::styled("_", Style::default().fg(Color::Yellow)),
            ]));
            lines.push(Line::styled(
                "Enter to save",
                Style::default().fg(Color::DarkGray),
            ));
        }
        None => {
            lines.push(Line::styled(
                "Press any key to go back",
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    if let Some(error) = error {
        lines.push(Line::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        ));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
