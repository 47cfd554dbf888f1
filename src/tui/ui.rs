use crate::highlight::{highlight_snippet, Segment};
use crate::results::{FilterKind, ResultItem};
use crate::tui::app::{App, Focus};
use crate::tui::colors::{self, Palette};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Lines per rendered result: title, metadata, two snippet lines, spacer
const ITEM_HEIGHT: u16 = 5;
const MAX_SUGGESTION_ROWS: u16 = 8;
const SEARCH_PREFIX: &str = " \u{1F50D} ";

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let palette = Palette::for_mode(app.controller.state().dark_mode());

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Search bar
            Constraint::Length(1), // History chips
            Constraint::Length(1), // Filter bar
            Constraint::Min(3),    // Results
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(frame, app, &palette, chunks[0]);
    draw_search_bar(frame, app, &palette, chunks[1]);
    draw_history(frame, app, &palette, chunks[2]);
    draw_filter_bar(frame, app, &palette, chunks[3]);
    draw_results(frame, app, &palette, chunks[4]);
    draw_status_bar(frame, app, &palette, chunks[5]);

    if app.controller.state().suggestions_visible() {
        draw_suggestions(frame, app, &palette, chunks[1], area);
    }

    if app.focus == Focus::Input {
        let cursor_x = chunks[1].x
            + 1
            + Line::from(SEARCH_PREFIX).width() as u16
            + app.input.display_offset(app.controller.state().query());
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position(Position::new(
            cursor_x.min(chunks[1].right().saturating_sub(2)),
            cursor_y,
        ));
    }
}

fn draw_header(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let left = " Search Algorithm Engine ";
    let right = format!(" {}  Ctrl+D ", colors::toggle_label(app.controller.state().dark_mode()));

    let padding = (area.width as usize)
        .saturating_sub(left.len() + Line::from(right.as_str()).width());
    let line = Line::from(vec![
        Span::styled(
            left,
            Style::default()
                .fg(palette.bar_fg)
                .bg(palette.bar_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ".repeat(padding), Style::default().bg(palette.bar_bg)),
        Span::styled(right, Style::default().fg(palette.bar_fg).bg(palette.bar_bg)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_search_bar(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let state = app.controller.state();
    let border_style = if app.focus == Focus::Input {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.muted)
    };

    let button = if state.is_loading() {
        Span::styled(" Searching... ", Style::default().fg(palette.muted))
    } else if state.can_submit() {
        Span::styled(
            " Enter: Search ",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(" Search ", Style::default().fg(palette.muted))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Search ")
        .title_bottom(Line::from(button).right_aligned());

    let text = if state.query().is_empty() {
        Line::from(vec![
            Span::raw(SEARCH_PREFIX),
            Span::styled(
                "Enter search terms...",
                Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC),
            ),
        ])
    } else {
        Line::from(vec![
            Span::raw(SEARCH_PREFIX),
            Span::styled(state.query(), Style::default().fg(palette.text)),
        ])
    };

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_suggestions(frame: &mut Frame, app: &App, palette: &Palette, anchor: Rect, area: Rect) {
    let state = app.controller.state();
    let suggestions = state.suggestions();

    let rows = (suggestions.len() as u16).min(MAX_SUGGESTION_ROWS);
    let width = anchor.width.saturating_sub(4).max(10);
    let top = anchor.bottom().saturating_sub(1);
    let height = (rows + 2).min(area.height.saturating_sub(top));
    if height < 3 {
        return;
    }
    let popup_area = Rect::new(anchor.x + 2, top, width.min(area.width), height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .style(Style::default().bg(palette.background));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    // Keep the selected row in view when the list is longer than the popup
    let first = match state.selected() {
        Some(i) if i >= inner.height as usize => i + 1 - inner.height as usize,
        _ => 0,
    };

    for (row, (index, suggestion)) in suggestions
        .iter()
        .enumerate()
        .skip(first)
        .take(inner.height as usize)
        .enumerate()
    {
        let is_selected = state.selected() == Some(index);
        let style = if is_selected {
            Style::default()
                .fg(palette.text)
                .bg(palette.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text)
        };
        let row_area = Rect::new(inner.x, inner.y + row as u16, inner.width, 1);
        frame.render_widget(Paragraph::new(format!(" {} ", suggestion)).style(style), row_area);
    }
}

fn draw_history(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let history = app.controller.state().history();
    if history.is_empty() {
        return;
    }

    let mut spans = vec![Span::styled(" Recent: ", Style::default().fg(palette.muted))];
    for (i, term) in history.entries().iter().enumerate() {
        let focused = app.focus == Focus::History && i == app.history_cursor;
        let style = if focused {
            Style::default()
                .fg(palette.bar_fg)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text).bg(palette.chip_bg)
        };
        spans.push(Span::styled(format!(" {} ", term), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_filter_bar(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let state = app.controller.state();
    if state.results().is_empty() {
        return;
    }

    let keys = [(FilterKind::Rank, "F2"), (FilterKind::DocType, "F3"), (FilterKind::Date, "F4")];
    let mut spans = vec![Span::raw(" ")];
    for (kind, key) in keys {
        let selector = state.filters().get(kind);
        let value_style = if selector.is_all() {
            Style::default().fg(palette.text)
        } else {
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
        };
        spans.push(Span::styled(format!("{}: ", kind.label()), Style::default().fg(palette.muted)));
        spans.push(Span::styled(format!("[{}]", selector), value_style));
        spans.push(Span::styled(format!(" {}   ", key), Style::default().fg(palette.muted)));
    }
    if !state.filters().is_unfiltered() {
        spans.push(Span::styled("F5: clear", Style::default().fg(palette.muted)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_results(frame: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    app.list.visible_rows = (area.height / ITEM_HEIGHT).max(1) as usize;

    let state = app.controller.state();
    let centered = |text: &str, style: Style| {
        Paragraph::new(text.to_string())
            .style(style)
            .alignment(Alignment::Center)
    };

    if state.is_loading() {
        frame.render_widget(
            centered("Searching...", Style::default().fg(palette.muted)),
            Rect::new(area.x, area.y + 1, area.width, 1),
        );
        return;
    }

    let mut y = area.y;
    if let Some(error) = state.error() {
        frame.render_widget(
            centered(error, Style::default().fg(palette.error)),
            Rect::new(area.x, y, area.width, 1),
        );
        y += 1;
    }
    if state.shows_no_results() {
        frame.render_widget(
            centered("No results found.", Style::default().fg(palette.muted)),
            Rect::new(area.x, y, area.width, 1),
        );
        return;
    }

    let query = state.query();
    let items = state.filtered_results();
    let start = app.list.scroll_offset.min(items.len());

    for (offset, item) in items.iter().skip(start).enumerate() {
        let top = y + offset as u16 * ITEM_HEIGHT;
        if top + ITEM_HEIGHT > area.bottom() {
            break;
        }
        let is_selected = app.focus == Focus::Results && app.list.selected == Some(start + offset);
        let item_area = Rect::new(area.x + 1, top, area.width.saturating_sub(2), ITEM_HEIGHT - 1);
        draw_result_item(frame, item, query, palette, is_selected, item_area);
    }
}

fn draw_result_item(
    frame: &mut Frame,
    item: &ResultItem,
    query: &str,
    palette: &Palette,
    is_selected: bool,
    area: Rect,
) {
    let bg = if is_selected {
        palette.selection_bg
    } else {
        palette.background
    };

    let rank = format!("#{} ", item.rank);
    let score = format!("Score: {}", item.score_label());
    let used = Line::from(rank.as_str()).width() + Line::from(item.title.as_str()).width() + score.len();
    let padding = (area.width as usize).saturating_sub(used);

    let title_line = Line::from(vec![
        Span::styled(rank, Style::default().fg(palette.muted)),
        Span::styled(
            item.title.as_str(),
            Style::default()
                .fg(palette.title)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ),
        Span::raw(" ".repeat(padding)),
        Span::styled(score, Style::default().fg(palette.score)),
    ]);

    let location = item.doc_id.as_deref().unwrap_or(item.display_url.as_str());
    let meta_line = Line::from(Span::styled(
        format!("{} \u{00B7} {} \u{00B7} {}", item.doc_type, item.date, location),
        Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC),
    ));

    let snippet_spans: Vec<Span> = highlight_snippet(&item.snippet, query)
        .into_iter()
        .map(|segment| match segment {
            Segment::Plain(text) => Span::styled(text, Style::default().fg(palette.text)),
            Segment::Marked(text) => Span::styled(
                text,
                Style::default()
                    .fg(palette.mark_fg)
                    .bg(palette.mark_bg)
                    .add_modifier(Modifier::BOLD),
            ),
        })
        .collect();

    let paragraph = Paragraph::new(vec![title_line, meta_line, Line::from(snippet_spans)])
        .style(Style::default().bg(bg))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let state = app.controller.state();

    let left_text = if state.is_loading() {
        " \u{23F3} Searching...".to_string()
    } else if state.has_searched() {
        let shown = app.controller.filtered_results().len();
        let mut text = format!(" {} of {} results", shown, state.results().len());
        if let Some(total) = state.total() {
            text.push_str(&format!(" | {} documents indexed", total));
        }
        text
    } else {
        " Ready".to_string()
    };

    let right_text = " Tab:Focus  \u{2191}\u{2193}:Suggest  F2-F4:Filter  Ctrl+D:Theme  Ctrl+Q:Quit ";

    // Build the status line: left-aligned text + padding + right-aligned text
    let available_width = area.width as usize;
    let left_len = Line::from(left_text.as_str()).width();
    let right_len = Line::from(right_text).width();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        // Not enough space, just show left text
        format!("{:width$}", left_text, width = available_width)
    };

    let status = Paragraph::new(status_str)
        .style(Style::default().fg(palette.bar_fg).bg(palette.bar_bg));

    frame.render_widget(status, area);
}
