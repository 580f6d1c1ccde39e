use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use todos_core::filter::items_left_label;
use todos_core::model::{Filter, Task};
use todos_core::storage::Storage;

use super::app::{App, Focus, Hitbox, Target};

const PLACEHOLDER: &str = "What needs to be done?";
const CHECKBOX_WIDTH: u16 = 4;
const DELETE_WIDTH: u16 = 2;
const CLEAR_COMPLETED_LABEL: &str = "Clear completed";
const FOOTER_GAP: u16 = 3;

pub fn render<S: Storage>(frame: &mut Frame, app: &mut App<S>) {
    app.hitboxes.clear();

    let [title, input, list, footer, hints] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(Span::styled("todos", app.theme.title())).alignment(Alignment::Center),
        title,
    );
    render_input(frame, app, input);
    render_list(frame, app, list);
    if !app.store.is_empty() {
        render_footer(frame, app, footer);
    }
    render_hints(frame, app, hints);
}

fn render_input<S: Storage>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    let focused = app.focus == Focus::Input;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border(focused))
        .title("New task");
    let inner = block.inner(area);

    let content = if app.input.is_empty() {
        Span::styled(PLACEHOLDER, app.theme.muted().add_modifier(Modifier::ITALIC))
    } else {
        Span::styled(app.input.clone(), app.theme.text())
    };
    frame.render_widget(Paragraph::new(content).block(block), area);

    if focused && inner.width > 0 {
        let typed = u16::try_from(app.input.chars().count()).unwrap_or(u16::MAX);
        let x = inner.x + typed.min(inner.width - 1);
        frame.set_cursor_position(Position::new(x, inner.y));
    }

    app.hitboxes.push(Hitbox {
        area,
        target: Target::Input,
    });
}

fn render_list<S: Storage>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    let focused = app.focus == Focus::List;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let visible: Vec<Task> = app.store.visible().into_iter().cloned().collect();
    if visible.is_empty() {
        let message = if app.store.is_empty() {
            "Nothing to do yet".to_string()
        } else {
            format!("No {} tasks", app.store.filter())
        };
        frame.render_widget(Paragraph::new(Span::styled(message, app.theme.muted())), inner);
        return;
    }

    let height = usize::from(inner.height);
    let offset = match app.selected {
        Some(index) if index >= height => index + 1 - height,
        _ => 0,
    };

    for (row, (index, task)) in visible
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .enumerate()
    {
        let y = inner.y + u16::try_from(row).unwrap_or(u16::MAX);
        let row_area = Rect::new(inner.x, y, inner.width, 1);
        let selected = focused && app.selected == Some(index);
        render_row(frame, app, row_area, index, task, selected);
    }
}

fn render_row<S: Storage>(
    frame: &mut Frame,
    app: &mut App<S>,
    area: Rect,
    index: usize,
    task: &Task,
    selected: bool,
) {
    let [checkbox, text, delete] = Layout::horizontal([
        Constraint::Length(CHECKBOX_WIDTH),
        Constraint::Min(1),
        Constraint::Length(DELETE_WIDTH),
    ])
    .areas(area);

    let base = if selected {
        Style::default().bg(app.theme.selected_bg)
    } else {
        Style::default()
    };
    let (marker, marker_style) = if task.completed {
        ("[x]", base.fg(app.theme.accent))
    } else {
        ("[ ]", base.fg(app.theme.muted))
    };
    let text_style = if task.completed {
        base.patch(app.theme.completed_text())
    } else {
        base.patch(app.theme.text())
    };

    frame.render_widget(Paragraph::new(Span::styled(marker, marker_style)).style(base), checkbox);
    frame.render_widget(
        Paragraph::new(Span::styled(task.text.clone(), text_style)).style(base),
        text,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(" ✕", base.fg(app.theme.muted))).style(base),
        delete,
    );

    app.hitboxes.push(Hitbox {
        area: text,
        target: Target::Row(index),
    });
    app.hitboxes.push(Hitbox {
        area: checkbox,
        target: Target::Checkbox(task.id),
    });
    app.hitboxes.push(Hitbox {
        area: delete,
        target: Target::Delete(task.id),
    });
}

fn render_footer<S: Storage>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    let label = items_left_label(app.store.active_count());
    let mut x = area.x;
    x = place(frame, area, x, &label, app.theme.text(), None, &mut app.hitboxes);
    x = x.saturating_add(FOOTER_GAP);

    let current = app.store.filter();
    for filter in Filter::ALL {
        let style = if filter == current {
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            app.theme.muted()
        };
        x = place(
            frame,
            area,
            x,
            filter.label(),
            style,
            Some(Target::Filter(filter)),
            &mut app.hitboxes,
        );
        x = x.saturating_add(1);
    }

    let clear_width = text_width(CLEAR_COMPLETED_LABEL);
    let clear_x = area.right().saturating_sub(clear_width).max(x);
    if app.clear_completed_enabled() {
        place(
            frame,
            area,
            clear_x,
            CLEAR_COMPLETED_LABEL,
            app.theme.text(),
            Some(Target::ClearCompleted),
            &mut app.hitboxes,
        );
    } else {
        place(
            frame,
            area,
            clear_x,
            CLEAR_COMPLETED_LABEL,
            app.theme.muted().add_modifier(Modifier::DIM),
            None,
            &mut app.hitboxes,
        );
    }
}

fn render_hints<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let hint = match app.focus {
        Focus::Input => "enter add · tab/↓ list · esc quit",
        Focus::List => {
            "space toggle · d delete · 1/2/3 filter · c clear completed · tab input · q quit"
        }
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(hint, app.theme.muted()))),
        area,
    );
}

// Draws `text` at column `x` inside `area` and returns the column after it.
fn place(
    frame: &mut Frame,
    area: Rect,
    x: u16,
    text: &str,
    style: Style,
    target: Option<Target>,
    hitboxes: &mut Vec<Hitbox>,
) -> u16 {
    let width = text_width(text);
    let slot = Rect::new(x, area.y, width, 1).intersection(area);
    if slot.width > 0 {
        frame.render_widget(Paragraph::new(Span::styled(text.to_string(), style)), slot);
        if let Some(target) = target {
            hitboxes.push(Hitbox { area: slot, target });
        }
    }
    x.saturating_add(width)
}

fn text_width(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}
