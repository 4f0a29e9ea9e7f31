// Copyright 2026 Thomas Johannesson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// New commit message dialog

use crate::app::AppState;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const DIALOG_WIDTH: u16 = 64;

/// Render the message input dialog as a centered overlay.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();

    let commit_summary = app
        .selected_commit()
        .map(|c| c.to_string())
        .unwrap_or_default();

    // Truncate summary if too long for dialog
    let max_summary_len = DIALOG_WIDTH as usize - 6;
    let display_summary = if commit_summary.chars().count() > max_summary_len {
        let head: String = commit_summary.chars().take(max_summary_len - 1).collect();
        format!("{head}…")
    } else {
        commit_summary
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", display_summary),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::DIM),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " New message:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(app.input.clone(), Style::default().fg(Color::Cyan)),
            Span::styled("▏", Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter ", Style::default().fg(Color::Cyan)),
            Span::raw("Apply   "),
            Span::styled("Esc ", Style::default().fg(Color::Cyan)),
            Span::raw("Cancel"),
        ])
        .alignment(Alignment::Center),
    ];

    let content_height = lines.len() as u16;
    let dialog_width = DIALOG_WIDTH.min(area.width.saturating_sub(4));
    let dialog_height = (content_height + 2).min(area.height.saturating_sub(2));

    let dialog_x = (area.width.saturating_sub(dialog_width)) / 2;
    let dialog_y = (area.height.saturating_sub(dialog_height)) / 2;

    let dialog_area = Rect {
        x: area.x + dialog_x,
        y: area.y + dialog_y,
        width: dialog_width,
        height: dialog_height,
    };

    frame.render_widget(Clear, dialog_area);

    let dialog = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Reword Commit ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .style(Style::default().bg(Color::Black)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    frame.render_widget(dialog, dialog_area);
}
