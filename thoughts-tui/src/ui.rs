//! UI rendering for the thoughts TUI.
//!
//! Handles all layout and rendering logic using ratatui. Everything here
//! reads the app state; the only mutation is the cursor position.

use crate::app::{App, InputMode};
use crate::theme::ThemePalette;
use crate::update::UpdateStatus;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
    Frame,
};
use thoughts_core::{PostContent, RenderedPost, Segment};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = app.theme.palette();

    // Clear background
    let area = frame.area();
    frame.render_widget(Block::default().style(palette.base_style()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Feed
            Constraint::Length(1), // Status line
            Constraint::Length(3), // Composer
            Constraint::Length(1), // Footer shortcuts
        ])
        .split(area);

    render_header(frame, app, &palette, chunks[0]);
    render_feed(frame, app, &palette, chunks[1]);
    render_status(frame, app, &palette, chunks[2]);
    render_composer(frame, app, &palette, chunks[3]);
    render_footer(frame, app, &palette, chunks[4]);

    if app.show_help {
        render_help_overlay(frame, &palette, area);
    }
    if let Some(message) = &app.alert {
        render_alert_overlay(frame, &palette, area, message);
    }
}

fn render_header(frame: &mut Frame, app: &App, palette: &ThemePalette, area: Rect) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20), // Title
            Constraint::Min(10),    // Pagination
            Constraint::Length(36), // Update notice
        ])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(" THOUGHTS", palette.title_style(true)),
        Span::styled(" feed", palette.muted_style()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(palette.border_style(false)),
    );
    frame.render_widget(title, header_chunks[0]);

    // Pagination indicator: newer posts to the left, older to the right.
    let page = &app.feed.page;
    let mut spans = Vec::new();
    if page.has_prev {
        spans.push(Span::styled("← newer  ", Style::default().fg(palette.primary)));
    }
    spans.push(Span::styled(
        format!("page {}", page.current),
        palette.title_style(false),
    ));
    if page.has_next {
        spans.push(Span::styled("  older →", Style::default().fg(palette.primary)));
    }

    let pagination = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(palette.border_style(false)),
        );
    frame.render_widget(pagination, header_chunks[1]);

    let update_style = match app.updates.status() {
        UpdateStatus::Waiting => palette.warning_style(),
        UpdateStatus::Current => palette.muted_style(),
    };
    let update = Paragraph::new(Line::from(Span::styled(
        format!("u {}", app.updates.refresh_label()),
        update_style,
    )))
    .alignment(Alignment::Right)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(palette.border_style(false)),
    );
    frame.render_widget(update, header_chunks[2]);
}

fn render_feed(frame: &mut Frame, app: &App, palette: &ThemePalette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border_style(app.input_mode == InputMode::Normal))
        .padding(Padding::horizontal(1));

    if app.feed.posts.is_empty() {
        let empty = if app.feed.loading {
            "loading thoughts..."
        } else {
            "(no thoughts yet)"
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(empty, palette.muted_style())))
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .feed
        .posts
        .iter()
        .map(|post| ListItem::new(post_lines(post, palette)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(palette.selection_style());

    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Lines for one feed entry: content, date, spacer.
fn post_lines<'a>(post: &'a RenderedPost, palette: &ThemePalette) -> Vec<Line<'a>> {
    let content_line = match &post.content {
        PostContent::Image { url } => Line::from(vec![
            Span::styled("▣ ", Style::default().fg(palette.accent)),
            Span::styled(url.as_str(), palette.link_style()),
        ]),
        PostContent::Text { segments } => Line::from(
            segments
                .iter()
                .map(|segment| match segment {
                    Segment::Text(text) => Span::raw(text.as_str()),
                    Segment::Link(url) => Span::styled(url.as_str(), palette.link_style()),
                })
                .collect::<Vec<_>>(),
        ),
    };

    vec![
        content_line,
        Line::from(Span::styled(post.date.as_str(), palette.date_style())),
        Line::default(),
    ]
}

fn render_status(frame: &mut Frame, app: &App, palette: &ThemePalette, area: Rect) {
    let line = if let Some(error) = &app.feed.error {
        Line::from(Span::styled(format!(" ⚠ {error}"), palette.error_style()))
    } else if app.feed.loading {
        Line::from(Span::styled(" loading...", palette.muted_style()))
    } else if let Some(status) = &app.status {
        Line::from(Span::styled(format!(" {status}"), palette.success_style()))
    } else {
        Line::default()
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_composer(frame: &mut Frame, app: &App, palette: &ThemePalette, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;

    let block = Block::default()
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled("COMPOSE", palette.title_style(editing)),
            Span::raw(" "),
        ]))
        .borders(Borders::ALL)
        .border_type(if editing {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(palette.border_style(editing));

    let content = if app.input.is_empty() {
        Line::from(Span::styled(app.placeholder, palette.muted_style()))
    } else {
        Line::from(Span::raw(app.input.as_str()))
    };

    frame.render_widget(Paragraph::new(content).block(block), area);

    if editing {
        let width = app.input[..app.input_cursor].chars().count() as u16;
        let x = (area.x + 1 + width).min(area.x + area.width.saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn render_footer(frame: &mut Frame, app: &App, palette: &ThemePalette, area: Rect) {
    let hint = match app.input_mode {
        InputMode::Normal => {
            " i compose · ↵ open · ←/→ newer/older · r reload · s notify · u refresh · t theme · ? help · q quit"
        }
        InputMode::Editing => " ↵ post · paste an image file to upload · esc done",
    };

    let footer = Paragraph::new(Line::from(Span::styled(hint, palette.muted_style())));
    frame.render_widget(footer, area);
}

fn render_help_overlay(frame: &mut Frame, palette: &ThemePalette, area: Rect) {
    let popup = centered_rect(50, 60, area);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(Span::styled("Keys", palette.title_style(true))),
        Line::default(),
        help_line(palette, "i", "compose a thought"),
        help_line(palette, "enter", "open selected image/link"),
        help_line(palette, "j/k ↑/↓", "select post"),
        help_line(palette, "→ or o", "older posts"),
        help_line(palette, "← or n", "newer posts"),
        help_line(palette, "r", "reload current page"),
        help_line(palette, "s", "subscribe to notifications"),
        help_line(palette, "u", "refresh / activate update"),
        help_line(palette, "t", "toggle theme"),
        help_line(palette, "q", "quit"),
    ];

    let help = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" help ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(palette.border_style(true))
            .padding(Padding::horizontal(2))
            .style(palette.base_style()),
    );
    frame.render_widget(help, popup);
}

fn help_line<'a>(palette: &ThemePalette, key: &'a str, action: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{key:>9}  "), Style::default().fg(palette.accent)),
        Span::raw(action),
    ])
}

fn render_alert_overlay(frame: &mut Frame, palette: &ThemePalette, area: Rect, message: &str) {
    let popup = centered_rect(60, 30, area);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(Span::raw(message)),
        Line::default(),
        Line::from(Span::styled("press any key", palette.muted_style())),
    ];

    let alert = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" notifications ")
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(palette.border_style(true))
                .padding(Padding::uniform(1))
                .style(palette.base_style()),
        );
    frame.render_widget(alert, popup);
}

/// Centered sub-rectangle by percentage, for overlays.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
