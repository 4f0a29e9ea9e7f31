// Commit list view rendering

use crate::app::{AppState, StatusKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

const FOOTER_STYLE: Style = Style::new().fg(Color::White).bg(Color::Blue);
const ERROR_STYLE: Style = Style::new().fg(Color::White).bg(Color::Red);

/// Width of the hash column, enough for a 10 character abbreviation.
const HASH_COLUMN_WIDTH: u16 = 10;

/// Render the commit list view over the whole frame.
pub fn render(app: &mut AppState, frame: &mut Frame) {
    let area = frame.area();
    render_in_area(app, frame, area);
}

/// Render the commit list view with a footer into `area`.
///
/// Also records how many rows the list can show so paging moves by one
/// screen.
pub fn render_in_area(app: &mut AppState, frame: &mut Frame, area: Rect) {
    let [list_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let block = Block::default().borders(Borders::ALL).title(" Commits ");

    // borders(2) + header(1)
    app.commit_list_visible_height = list_area.height.saturating_sub(3) as usize;

    if app.commits.is_empty() {
        let placeholder = Paragraph::new("No commits")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, list_area);
    } else {
        let header = Row::new(vec![Cell::from("Hash"), Cell::from("Message")])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = app
            .commits
            .iter()
            .map(|commit| {
                Row::new(vec![
                    Cell::from(commit.hash.clone()),
                    Cell::from(commit.message.clone()),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [Constraint::Length(HASH_COLUMN_WIDTH), Constraint::Min(20)],
        )
        .header(header)
        .block(block)
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan));

        let mut state = TableState::default().with_selected(Some(app.selection_index));
        frame.render_stateful_widget(table, list_area, &mut state);
    }

    let (text, style) = match &app.status {
        Some(status) if status.kind == StatusKind::Error => (status.text.clone(), ERROR_STYLE),
        Some(status) => (status.text.clone(), FOOTER_STYLE),
        None => (
            format!(" {} commits  Enter: reword  h: help  q: quit", app.commits.len()),
            FOOTER_STYLE,
        ),
    };
    frame.render_widget(Paragraph::new(text).style(style), footer_area);
}
