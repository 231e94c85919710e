use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::domain::category;
use crate::tui::app::TuiApp;
use crate::view::{Badge, FeedBody, Header, RenderedFeed, RenderedItem};

const CLOSE_LABEL: &str = "[ Close ]";

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    let feed = app.view.project(&app.feed);
    let banner_height = if feed.error.is_some() { 1 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),             // Header
            Constraint::Length(banner_height), // Error banner
            Constraint::Min(4),                // News list
            Constraint::Length(1),             // Status bar
        ])
        .split(frame.area());

    render_header(frame, &feed.header, chunks[0], colors);
    if let Some(error) = &feed.error {
        let banner = Paragraph::new(format!("⚠ {}", error))
            .style(Style::default().fg(colors.error).add_modifier(Modifier::BOLD));
        frame.render_widget(banner, chunks[1]);
    }
    render_body(frame, app, &feed, chunks[2], colors);
    render_status_bar(frame, app, &feed, chunks[3], colors);

    app.hit_areas.modal = None;
    app.hit_areas.close_button = None;
    if app.modal.is_open() {
        render_modal(frame, app, colors);
    }
}

fn render_header(frame: &mut Frame, header: &Header, area: Rect, colors: &ColorConfig) {
    let badge_style = Style::default()
        .fg(colors.header_badge_fg)
        .bg(colors.header_badge_bg)
        .add_modifier(Modifier::BOLD);

    let mut badges = Vec::new();
    for badge in &header.badges {
        badges.push(Span::styled(format!(" {} ", badge), badge_style));
        badges.push(Span::raw(" "));
    }

    let mut lines = vec![Line::from(badges)];
    if let Some(description) = &header.description {
        lines.push(Line::from(description.as_str()));
    }
    if let Some(updated) = &header.last_updated {
        lines.push(Line::from(Span::styled(
            format!("⏰ {}", updated),
            Style::default().fg(colors.meta),
        )));
    }

    frame.render_widget(
        Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_body(
    frame: &mut Frame,
    app: &mut TuiApp,
    feed: &RenderedFeed,
    area: Rect,
    colors: &ColorConfig,
) {
    let block = Block::default()
        .title(" News ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let items = match &feed.body {
        FeedBody::Loading(text) => {
            app.hit_areas.list = None;
            let loading = Paragraph::new(text.as_str())
                .block(block)
                .style(Style::default().fg(colors.refreshing));
            frame.render_widget(loading, area);
            return;
        }
        FeedBody::Items(items) => items,
    };

    app.hit_areas.list = Some(block.inner(area));

    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| ListItem::new(item_lines(item, colors)))
        .collect();

    let list = List::new(list_items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn item_lines<'a>(item: &'a RenderedItem, colors: &ColorConfig) -> Vec<Line<'a>> {
    let mut title = vec![
        Span::styled(
            format!("{:>2} ", item.number),
            Style::default()
                .fg(colors.number_badge)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(item.title.as_str()),
    ];
    for badge in &item.badges {
        let style = match badge {
            Badge::Latest(_) => Style::default()
                .fg(colors.latest_badge)
                .add_modifier(Modifier::BOLD),
            Badge::Link(_) => Style::default().fg(colors.link_indicator),
        };
        title.push(Span::raw(" "));
        title.push(Span::styled(badge.text(), style));
    }

    let meta = Line::from(Span::styled(
        format!("   {}", item.meta.to_text()),
        Style::default().fg(colors.meta),
    ));

    vec![Line::from(title), meta]
}

fn render_status_bar(
    frame: &mut Frame,
    app: &TuiApp,
    feed: &RenderedFeed,
    area: Rect,
    colors: &ColorConfig,
) {
    let status = if let Some(msg) = &app.status_message {
        msg.clone()
    } else if let Some(refreshing) = &feed.refreshing {
        refreshing.clone()
    } else if app.modal.is_open() {
        "Esc/x:Close  q:Quit".to_string()
    } else {
        "j/k:Nav  Enter:Open  r:Refresh  q:Quit".to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}

fn render_modal(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    let Some(item) = app.modal.selection() else {
        return;
    };

    let area = centered_rect(60, 50, frame.area());

    let mut lines = vec![
        Line::from(Span::styled(
            item.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if item.is_latest {
        lines.push(Line::from(Span::styled(
            app.view.display().latest_badge.as_str(),
            Style::default()
                .fg(colors.latest_badge)
                .add_modifier(Modifier::BOLD),
        )));
    }
    if let Some(category) = &item.category {
        lines.push(Line::from(format!(
            "Category: {} {}",
            category::resolve(Some(category)),
            category
        )));
    }
    if let Some(source) = &item.source {
        lines.push(Line::from(format!("Source: {}", source)));
    }
    if let Some(timestamp) = &item.timestamp {
        lines.push(Line::from(format!("Time: {}", timestamp)));
    }

    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.modal_border));
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );

    let close_width = (CLOSE_LABEL.len() as u16).min(inner.width);
    let close_button = Rect::new(
        inner.right().saturating_sub(close_width),
        inner.bottom().saturating_sub(1),
        close_width,
        1,
    );
    frame.render_widget(
        Paragraph::new(CLOSE_LABEL).style(Style::default().fg(colors.modal_border)),
        close_button,
    );

    app.hit_areas.modal = Some(area);
    app.hit_areas.close_button = Some(close_button);
}

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
