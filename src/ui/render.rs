use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState};
use crate::models::EmailSummary;
use crate::utils::{format_date, truncate_string};

use super::styles;

/// Maximum subject length in the list pane
const LIST_SUBJECT_WIDTH: usize = 38;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(8),    // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);

    if app.is_authenticated() {
        render_summaries(frame, app, chunks[1]);
    } else {
        render_signin(frame, chunks[1]);
    }

    render_status_bar(frame, app, chunks[2]);

    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Mailbrief";
    let right = if app.is_authenticated() {
        format!("Emails: {}  [?] Help ", app.emails.len())
    } else {
        "[?] Help ".to_string()
    };

    let padding = area
        .width
        .saturating_sub(title.len() as u16 + right.len() as u16) as usize;

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(right, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_signin(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Not signed in", styles::title_style())),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("[l]", styles::help_key_style()),
            Span::raw(" to sign in with Google."),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "After approving access, restart mailbrief with the redirect",
            styles::muted_style(),
        )),
        Line::from(Span::styled(
            "link from your browser:  mailbrief '<redirect-url>'",
            styles::muted_style(),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_summaries(frame: &mut Frame, app: &App, area: Rect) {
    if app.emails.is_empty() {
        let message = if app.loading {
            "Loading summaries..."
        } else {
            "No summaries yet - press [f] to fetch"
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(message, styles::muted_style())))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::NONE));
        frame.render_widget(paragraph, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_list(frame, app, chunks[0]);
    render_detail(frame, app, chunks[1]);
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .emails
        .iter()
        .map(|email| {
            let line = Line::from(vec![
                Span::styled(format!("{:>4} ", email.id_display()), styles::muted_style()),
                Span::styled(
                    truncate_string(email.subject_display(), LIST_SUBJECT_WIDTH),
                    styles::list_item_style(),
                ),
                Span::raw(" "),
                Span::styled(format!("[{}]", email.tag_display()), styles::tag_style()),
            ]);
            ListItem::new(line)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::muted_style())
        .title(Span::styled(
            format!(" Summaries ({}) ", app.emails.len()),
            styles::title_style(),
        ));

    let list = List::new(items)
        .block(block)
        .highlight_style(styles::selected_style())
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selection));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::muted_style())
        .title(Span::styled(" Detail ", styles::title_style()));

    let Some(email) = app.selected_email() else {
        frame.render_widget(block, area);
        return;
    };

    let lines = detail_lines(email);
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Project one record into the detail pane, fallbacks applied.
fn detail_lines(email: &EmailSummary) -> Vec<Line<'_>> {
    let mut lines = vec![Line::from(vec![
        Span::styled("Subject: ", styles::heading_style()),
        Span::raw(email.subject_display()),
    ])];

    if let Some(sender) = email.sender.as_deref().filter(|s| !s.is_empty()) {
        lines.push(Line::from(vec![
            Span::styled("From: ", styles::heading_style()),
            Span::raw(sender),
        ]));
    }

    if let Some(created_at) = email.created_at.as_deref() {
        lines.push(Line::from(vec![
            Span::styled("Date: ", styles::heading_style()),
            Span::styled(format_date(created_at), styles::muted_style()),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled("Tag: ", styles::heading_style()),
        Span::styled(email.tag_display(), styles::tag_style()),
    ]));

    if let Some(snippet) = email.snippet.as_deref().filter(|s| !s.is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(snippet, styles::muted_style())));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Summary", styles::heading_style())));
    lines.push(Line::from(email.summary_display()));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Suggested Reply",
        styles::heading_style(),
    )));
    lines.push(Line::from(email.suggested_reply_display()));

    lines
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left = if let Some(ref error) = app.last_error {
        Span::styled(format!(" {}", error), styles::error_style())
    } else if app.loading {
        Span::styled(" Loading summaries...", styles::muted_style())
    } else if let Some(ref message) = app.status_message {
        Span::styled(format!(" {}", message), styles::success_style())
    } else {
        Span::raw("")
    };

    let hints = if app.is_authenticated() {
        " [f] fetch | [s] sign out | [q] quit "
    } else {
        " [l] sign in | [q] quit "
    };

    let padding = area
        .width
        .saturating_sub(left.content.len() as u16 + hints.len() as u16) as usize;

    let line = Line::from(vec![
        left,
        Span::raw(" ".repeat(padding)),
        Span::styled(hints, styles::muted_style()),
    ]);

    frame.render_widget(Paragraph::new(line).style(styles::status_bar_style()), area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = popup_area(frame.area(), 40, 12);
    frame.render_widget(Clear, area);

    let keys = [
        ("l", "Sign in with Google"),
        ("s", "Sign out"),
        ("f / r", "Fetch summaries"),
        ("j / ↓", "Next email"),
        ("k / ↑", "Previous email"),
        ("?", "Toggle this help"),
        ("q", "Quit"),
    ];

    let lines: Vec<Line> = keys
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!(" {:<6}", key), styles::help_key_style()),
                Span::styled(*desc, styles::help_desc_style()),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::muted_style())
        .title(Span::styled(" Help ", styles::title_style()));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Centered popup rect with a fixed size, clamped to the frame.
fn popup_area(base: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(base.width);
    let height = height.min(base.height);
    Rect {
        x: base.x + (base.width - width) / 2,
        y: base.y + (base.height - height) / 2,
        width,
        height,
    }
}
