//! UI rendering with Ratatui.

use crate::app::{App, AppState, FormField, InputMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use shoplist_core::{share, Filter, Item, Storage};

/// Main render function.
pub fn render<S: Storage>(frame: &mut Frame, app: &App<S>) {
    match app.state {
        AppState::Running => render_list_screen(frame, app),
        AppState::Quit => {}
    }
}

fn render_list_screen<S: Storage>(frame: &mut Frame, app: &App<S>) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Stats
            Constraint::Length(1), // Filters
            Constraint::Min(3),    // List
            Constraint::Length(1), // Status / help
        ])
        .split(area);

    render_stats(frame, app, chunks[0]);
    render_filters(frame, app, chunks[1]);
    render_items(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);

    match app.input_mode {
        InputMode::Normal => {}
        InputMode::AddItem => render_add_form(frame, app, area),
        InputMode::ConfirmClearAll => render_confirm(frame, area),
        InputMode::Share => render_share(frame, app, area),
    }
}

fn render_stats<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let counts = app.session.counts();

    let block = Block::default()
        .title(" 🛒 Shopping List ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = Line::from(vec![
        Span::styled("Total ", Style::default().fg(Color::DarkGray)),
        Span::styled(counts.total.to_string(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::styled("Pending ", Style::default().fg(Color::DarkGray)),
        Span::styled(counts.pending.to_string(), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::styled("Purchased ", Style::default().fg(Color::DarkGray)),
        Span::styled(counts.purchased.to_string(), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), inner);
}

fn render_filters<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let counts = app.session.counts();

    let mut spans = Vec::new();
    for (i, filter) in Filter::ALL.into_iter().enumerate() {
        let label = format!(" {} {} ({}) ", i + 1, filter.label(), counts.for_filter(filter));
        let style = if filter == app.filter {
            Style::default()
                .bg(Color::Rgb(60, 60, 80))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the grouped list with one header row per category.
fn render_items<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let groups = app.session.grouped(app.filter);
    if groups.is_empty() {
        render_empty(frame, app.filter, inner);
        return;
    }

    let mut rows = Vec::new();
    let mut selected_row = None;
    let mut item_index = 0;

    for (category, items) in &groups {
        let done = items.iter().filter(|item| item.purchased).count();
        rows.push(ListItem::new(Line::from(vec![
            Span::styled(
                format!("{} {}", category.glyph(), category.label()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}/{}", done, items.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ])));

        for item in items {
            if item_index == app.selected_index {
                selected_row = Some(rows.len());
            }
            rows.push(item_row(item, item_index == app.selected_index));
            item_index += 1;
        }
    }

    let mut state = ListState::default().with_selected(selected_row);
    frame.render_stateful_widget(List::new(rows), inner, &mut state);
}

fn item_row(item: &Item, selected: bool) -> ListItem<'static> {
    let (check, name_style) = if item.purchased {
        (
            "  [x] ",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        ("  [ ] ", Style::default().fg(Color::White))
    };

    let mut spans = vec![
        Span::styled(check, Style::default().fg(Color::Green)),
        Span::styled(item.name.clone(), name_style),
    ];
    if item.quantity > 1 {
        spans.push(Span::styled(
            format!(" ×{}", item.quantity),
            Style::default().fg(Color::Yellow),
        ));
    }
    spans.push(Span::styled(
        format!("  added {}", added_on(&item.created_at)),
        Style::default().fg(Color::DarkGray),
    ));

    let row = ListItem::new(Line::from(spans));
    if selected {
        row.style(
            Style::default()
                .bg(Color::Rgb(60, 60, 80))
                .add_modifier(Modifier::BOLD),
        )
    } else {
        row
    }
}

/// Calendar date of a creation timestamp, or the raw text if it does not parse.
fn added_on(created_at: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(created_at)
        .map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| created_at.to_string())
}

fn render_empty(frame: &mut Frame, filter: Filter, area: Rect) {
    let (title, hint) = match filter {
        Filter::All => (
            "Your shopping list is empty".to_string(),
            "Press 'a' to add your first item".to_string(),
        ),
        other => (
            format!("No {} items", other.label().to_lowercase()),
            "Press '1' to see your complete list".to_string(),
        ),
    };

    let text = vec![
        Line::from(Span::styled(title, Style::default().fg(Color::White).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];
    let centered = centered_rect(area.width, 2, area);
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), centered);
}

fn render_footer<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let line = match app.status {
        Some(ref status) => Line::from(Span::styled(status.as_str(), Style::default().fg(Color::Green))),
        None => Line::from(Span::styled(
            "a: add | space: toggle | d: delete | c: clear purchased | X: clear all | s: share | tab: filter | q: quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_add_form<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let dialog_area = centered_rect(56.min(area.width.saturating_sub(4)), 9, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(" ➕ Add New Item ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let form = &app.form;
    let category = format!("◂ {} {} ▸", form.category.glyph(), form.category.label());
    render_form_field(frame, "Item Name", &form.name, form.field == FormField::Name, chunks[0]);
    render_form_field(frame, "Quantity", &form.quantity, form.field == FormField::Quantity, chunks[1]);
    render_form_field(frame, "Category", &category, form.field == FormField::Category, chunks[2]);

    let help = if form.can_submit() {
        "Enter: add | Tab: next field | ↑↓: adjust | Esc: cancel"
    } else {
        "Enter an item name | Esc: cancel"
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[4],
    );
}

fn render_form_field(frame: &mut Frame, label: &str, value: &str, focused: bool, area: Rect) {
    let value_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if focused { "_" } else { "" };

    let line = Line::from(vec![
        Span::styled(format!("{:<10}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{}{}", value, cursor), value_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_confirm(frame: &mut Frame, area: Rect) {
    let dialog_area = centered_rect(60.min(area.width.saturating_sub(4)), 6, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(" Clear All ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let text = vec![
        Line::from("Are you sure you want to clear your entire shopping list?"),
        Line::from("This action cannot be undone."),
        Line::from(""),
        Line::from(Span::styled("y: clear | n: keep", Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
}

fn render_share<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let dialog_width = 70.min(area.width.saturating_sub(4));
    let dialog_height = 12.min(area.height.saturating_sub(2));
    let dialog_area = centered_rect(dialog_width, dialog_height, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(format!(" 🔗 Share {} ", share::SHARE_TITLE))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    let message = Paragraph::new(app.share_message())
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });
    frame.render_widget(message, chunks[0]);

    let url = Paragraph::new(app.share_url().to_string())
        .style(Style::default().fg(Color::Cyan))
        .wrap(Wrap { trim: false });
    frame.render_widget(url, chunks[1]);

    let help = Paragraph::new("c: copy link | Esc: close")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);
}

/// Helper to create a centered rectangle.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
