// Help dialog view showing keybindings

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the help dialog as a centered overlay.
pub fn render(frame: &mut Frame) {
    let area = frame.area();

    // Build help content first to calculate required size
    let help_lines = vec![
        Line::from(""),
        section("Navigation"),
        Line::from(""),
        binding("↑/↓ k/j", "Move selection up/down"),
        binding("PgUp/PgDn", "Move one page up/down"),
        Line::from(""),
        section("Rewriting"),
        Line::from(""),
        binding("Enter/e", "Reword the selected commit"),
        binding("a", "Abort a stopped rewrite"),
        binding("r", "Reload the commit list"),
        Line::from(""),
        section("Other"),
        Line::from(""),
        binding("h", "Show this help dialog"),
        binding("Esc/q", "Close dialog / Quit application"),
        Line::from(""),
    ];

    // Calculate dialog size based on content
    let content_width = 50; // Longest line + padding
    let content_height = help_lines.len() as u16;
    let dialog_width = content_width.min(area.width.saturating_sub(4));
    let dialog_height = (content_height + 2).min(area.height.saturating_sub(2)); // +2 for borders

    // Center the dialog
    let dialog_x = (area.width.saturating_sub(dialog_width)) / 2;
    let dialog_y = (area.height.saturating_sub(dialog_height)) / 2;

    let dialog_area = Rect {
        x: area.x + dialog_x,
        y: area.y + dialog_y,
        width: dialog_width,
        height: dialog_height,
    };

    // Clear the background to hide underlying content
    frame.render_widget(Clear, dialog_area);

    let help_text = Paragraph::new(help_lines)
        .block(
            Block::default()
                .title(" Help - Keybindings ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .style(Style::default().bg(Color::Black)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    frame.render_widget(help_text, dialog_area);
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn binding<'a>(keys: &'a str, description: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {keys:<12}"), Style::default().fg(Color::Cyan)),
        Span::raw(description),
    ])
}
