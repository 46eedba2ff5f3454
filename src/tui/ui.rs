use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::catalog::AppEntry;
use super::theme::*;

/// Title row, icon grid, status row.
pub fn split(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(1), // Title
        Constraint::Min(0),    // Grid
        Constraint::Length(1), // Status + hotkeys
    ])
    .areas(area)
}

pub fn render(frame: &mut Frame, app: &App) {
    let [title, grid, status] = split(frame.area());

    render_title(frame, title, app);
    render_grid(frame, grid, app);
    render_status(frame, status, app);
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled("All apps", Style::new().fg(TEXT_WHITE).bold()),
        Span::styled(format!("  {}", app.catalog.len()), Style::new().fg(TEXT_DIM)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_grid(frame: &mut Frame, area: Rect, app: &App) {
    if app.catalog.is_empty() {
        let empty = Paragraph::new(Line::styled("No applications found", Style::new().fg(TEXT_DIM)))
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let rows = app.geometry.rows.max(1) as usize;
    let tile_width = app.tile_width_cells() as i32;
    let tile_height = app.tile_height_cells();
    let left = area.x as i32 + app.offset_cells();

    for (i, entry) in app.catalog.apps().iter().enumerate() {
        let column = (i / rows) as i32;
        let row = (i % rows) as u16;

        let x = left + column * tile_width;
        // Tiles cut by the left edge are skipped; the right edge clips
        if x < area.x as i32 || x >= area.right() as i32 {
            continue;
        }
        let y = area.y + row * tile_height;
        if y >= area.bottom() {
            continue;
        }

        let tile = Rect::new(
            x as u16,
            y,
            (tile_width as u16).min(area.right() - x as u16),
            tile_height.min(area.bottom() - y),
        );
        render_tile(frame, tile, app, i, entry);
    }
}

fn render_tile(frame: &mut Frame, area: Rect, app: &App, index: usize, entry: &AppEntry) {
    let color = TILE_COLORS[index % TILE_COLORS.len()];
    let is_selected = app.selected == Some(index);

    let initial = entry
        .name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();
    let icon_style = if is_selected {
        Style::new().fg(color).bold().reversed()
    } else {
        Style::new().fg(color).bold()
    };

    let label_width = (app.params.bubble_width / app.labels.cell_width_px.max(1) as u32) as usize;
    let label_style = if is_selected {
        Style::new().fg(TEXT_WHITE).bold()
    } else {
        Style::new().fg(TEXT_WHITE)
    };

    let mut lines = vec![Line::from(Span::styled(format!("[ {} ]", initial), icon_style))];
    lines.extend(
        wrap_label(&entry.name, label_width, 2)
            .into_iter()
            .map(|text| Line::styled(text, label_style)),
    );

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.snapshot();

    let mut spans = vec![
        Span::styled(format!("x {}", app.offset), Style::new().fg(TEXT_DIM)),
    ];
    if app.reducer.is_dragging() {
        spans.push(Span::styled(" • dragging", Style::new().fg(TILE_GOLD)));
    } else if state.has_fling() && state.scroll_x != state.fling_end_pos {
        spans.push(Span::styled(
            format!(" • fling {}px/s → {}", state.fling_velocity_x, state.fling_end_pos),
            Style::new().fg(FLING_GREEN),
        ));
    }
    if let Some(selected) = app.selected_app() {
        spans.push(Span::styled(" • ", Style::new().fg(TEXT_DIM)));
        spans.push(Span::styled(selected.name.clone(), Style::new().fg(TEXT_WHITE).bold()));
        if let Some(exec) = &selected.exec {
            spans.push(Span::styled(format!(" ({})", exec), Style::new().fg(TEXT_DIM)));
        }
    }

    let hotkeys = Line::from(vec![
        Span::styled("[drag]", Style::new().fg(TEXT_WHITE)),
        Span::styled(" scroll • ", Style::new().fg(TEXT_DIM)),
        Span::styled("[Esc]", Style::new().fg(TEXT_WHITE)),
        Span::styled(" cancel • ", Style::new().fg(TEXT_DIM)),
        Span::styled("[q]", Style::new().fg(TEXT_WHITE)),
        Span::styled("uit", Style::new().fg(TEXT_DIM)),
    ]);

    let [left, right] = Layout::horizontal([Constraint::Min(0), Constraint::Length(hotkeys.width() as u16)])
        .areas(area);
    frame.render_widget(Paragraph::new(Line::from(spans)), left);
    frame.render_widget(Paragraph::new(hotkeys), right);
}

/// Wrap a caption into at most `max_lines` lines of `width` characters.
/// Overflow on the last line is marked with an ellipsis.
fn wrap_label(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return vec![];
    }

    let mut lines: Vec<String> = vec![];
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let current_len = current.chars().count();
            let needed = if current.is_empty() { word.len() } else { current_len + 1 + word.len() };
            if needed <= width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.extend(word.iter());
                break;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                continue;
            }
            // Word longer than a whole line
            lines.push(word[..width].iter().collect());
            word = word[width..].to_vec();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let mut chars: Vec<char> = last.chars().collect();
            chars.truncate(width.saturating_sub(1));
            chars.push('…');
            *last = chars.into_iter().collect();
        }
    }
    lines
}
