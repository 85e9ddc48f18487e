//! Stateless UI rendering for the trivia board.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};
use strictly_trivia::{Board, CATEGORY_COUNT, CLUES_PER_CATEGORY, Clue, Coordinate, RevealState};

use super::app::App;

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(12),   // Board
            Constraint::Length(6), // Clue detail
            Constraint::Length(3), // Status
        ])
        .split(area);

    let title = Paragraph::new("Strictly Trivia")
        .style(Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    match app.board() {
        Some(board) => {
            draw_board(frame, chunks[1], board, app.cursor());
            draw_detail(frame, chunks[2], board.clue(app.cursor()));
        }
        None => draw_placeholder(frame, chunks[1], app),
    }

    draw_status(frame, chunks[3], app);
}

fn draw_board(frame: &mut Frame, area: Rect, board: &Board, cursor: Coordinate) {
    let header = Row::new(board.categories().iter().map(|category| {
        let title = Line::from(category.title().to_uppercase()).centered();
        let style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        Cell::from(title).style(style)
    }))
    .height(2);

    let rows = (0..CLUES_PER_CATEGORY).map(|row| {
        Row::new((0..CATEGORY_COUNT).map(|column| {
            let coord = Coordinate::new(column, row);
            match board.clue(coord) {
                Some(clue) => draw_cell(clue, coord == cursor),
                None => Cell::from(""),
            }
        }))
        .height(2)
    });

    let widths = [Constraint::Ratio(1, CATEGORY_COUNT as u32); CATEGORY_COUNT];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(table, area);
}

fn draw_cell(clue: &Clue, selected: bool) -> Cell<'static> {
    let (symbol, base_style) = match clue.state() {
        RevealState::Hidden => ("?", Style::default().fg(Color::White).bg(Color::Blue)),
        RevealState::ShowingQuestion => ("Q", Style::default().fg(Color::Black).bg(Color::Yellow)),
        RevealState::ShowingAnswer => ("A", Style::default().fg(Color::Black).bg(Color::Green)),
    };

    let style = if selected {
        base_style.add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        base_style
    };

    let text = Line::from(symbol).centered();
    Cell::from(text).style(style)
}

fn draw_detail(frame: &mut Frame, area: Rect, clue: Option<&Clue>) {
    let (heading, text) = match clue {
        Some(clue) => match clue.state() {
            RevealState::Hidden => ("Hidden", "Press Enter to reveal the question.".to_string()),
            RevealState::ShowingQuestion => ("Question", clue.question().to_string()),
            RevealState::ShowingAnswer => ("Answer", clue.answer().to_string()),
        },
        None => ("", String::new()),
    };

    let detail = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(heading).borders(Borders::ALL));
    frame.render_widget(detail, area);
}

fn draw_placeholder(frame: &mut Frame, area: Rect, app: &App) {
    let (text, style) = match app.failure() {
        Some(reason) => (
            format!("Failed to load a board: {}", reason),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        None => (
            "Loading categories...".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let placeholder = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(placeholder, area);
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let help = if app.is_loading() {
        "loading... | r restart | q quit"
    } else {
        "arrows move | enter reveal | r restart | q quit"
    };

    let style = if app.failure().is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let status = Paragraph::new(format!("{}  ({})", app.status_message(), help))
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}
