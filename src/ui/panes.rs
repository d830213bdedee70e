//! Rendering logic for each TUI pane

use crate::buffer::linear::LinearBuffer;
use crate::buffer::tree::TreePool;
use crate::engine::errors::EngineError;
use crate::program::Algorithm;
use crate::step::StepEvent;
use crate::ui::theme::DEFAULT_THEME;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Color for one bar, layered from weakest to strongest claim: default, search
/// window, settled, touched by the current event.
fn bar_color(index: usize, buf: &LinearBuffer, last_event: Option<&StepEvent>) -> Color {
    if let Some(event) = last_event {
        if event.operands().contains(&index) {
            return DEFAULT_THEME.bar_active;
        }
    }
    if buf.is_settled(index) {
        return DEFAULT_THEME.bar_settled;
    }
    if let Some(StepEvent::RangeNarrow { lo, hi, .. }) = last_event {
        if (*lo..=*hi).contains(&index) {
            return DEFAULT_THEME.bar_window;
        }
    }
    DEFAULT_THEME.bar
}

pub fn render_bars_pane(
    frame: &mut Frame,
    area: Rect,
    buf: &LinearBuffer,
    last_event: Option<&StepEvent>,
    target: Option<u32>,
    is_focused: bool,
) {
    let title = match target {
        Some(t) => format!("Values (target {})", t),
        None => "Values".to_string(),
    };
    let block = pane_block(&title, is_focused);

    if buf.is_empty() {
        let paragraph = Paragraph::new("(no values)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    // Fit all bars into the inner width; show numbers only when bars are
    // wide enough to carry them.
    let inner_width = area.width.saturating_sub(2).max(1);
    let n = buf.len() as u16;
    let bar_gap: u16 = 1;
    let bar_width = ((inner_width.saturating_sub(n.saturating_sub(1) * bar_gap)) / n).max(1);
    let show_values = bar_width >= 3;

    let bars: Vec<Bar> = buf
        .values()
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let color = bar_color(i, buf, last_event);
            let bar = Bar::default()
                .value(u64::from(v))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color));
            if show_values {
                bar
            } else {
                bar.text_value(String::new())
            }
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(bar_gap);
    frame.render_widget(chart, area);
}

pub fn render_tree_pane(frame: &mut Frame, area: Rect, pool: &TreePool, is_focused: bool) {
    let block = pane_block("Tree", is_focused);

    let levels = pool.levels();
    if levels.is_empty() {
        let paragraph = Paragraph::new("(empty tree)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let depth = levels.len();
    let mut lines: Vec<Line> = Vec::new();
    for (level, ids) in levels.iter().enumerate() {
        // Wider gaps near the root keep parents visually over children.
        let gap = " ".repeat(2usize.pow((depth - level) as u32));
        let mut spans: Vec<Span> = Vec::new();
        for (k, &id) in ids.iter().enumerate() {
            if k > 0 {
                spans.push(Span::raw(gap.clone()));
            }
            let label = pool.label(id).unwrap_or("?");
            let style = if pool.is_visited(id) {
                Style::default()
                    .fg(DEFAULT_THEME.node_visited)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.node)
            };
            spans.push(Span::styled(format!("({})", label), style));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    // Visit order under the picture.
    let visited = pool.visited_labels();
    if !visited.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("order: {}", visited.join(" ")),
            Style::default().fg(DEFAULT_THEME.success),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block.padding(Padding::new(0, 0, 1, 0)))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

pub fn render_trace_pane(
    frame: &mut Frame,
    area: Rect,
    trace: &[StepEvent],
    defect: Option<&EngineError>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block("Trace", is_focused);

    if trace.is_empty() && defect.is_none() {
        let paragraph = Paragraph::new("(no events yet)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let last = trace.len().saturating_sub(1);
    let mut all_items: Vec<ListItem> = trace
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let color = match event {
                StepEvent::Done { .. } => DEFAULT_THEME.success,
                StepEvent::SettleRange { .. } => DEFAULT_THEME.success,
                StepEvent::Swap { .. } | StepEvent::Overwrite { .. } => DEFAULT_THEME.secondary,
                _ => DEFAULT_THEME.fg,
            };
            let mut style = Style::default().fg(color);
            if i == last {
                style = style.add_modifier(Modifier::BOLD);
            }
            ListItem::new(format!("{:>4}  {}", i + 1, event)).style(style)
        })
        .collect();
    if let Some(err) = defect {
        all_items.push(
            ListItem::new(format!("      {}", err)).style(
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD),
            ),
        );
    }

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}

pub enum RunBadge {
    Ready,
    Running,
    Done,
    Cancelled,
    Defect,
}

pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    algorithm: Algorithm,
    steps: usize,
    pace_ms: u64,
    message: &str,
    badge: RunBadge,
) {
    let layout = ratatui::layout::Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([
            ratatui::layout::Constraint::Percentage(55),
            ratatui::layout::Constraint::Percentage(45),
        ])
        .split(area);

    // Left side: algorithm, step count, pace, status message
    let left_spans = vec![
        Span::styled(
            format!(" {} {} ", algorithm.label(), algorithm.complexity()),
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" step {} ", steps),
            Style::default()
                .bg(DEFAULT_THEME.status_bg)
                .fg(DEFAULT_THEME.fg),
        ),
        Span::styled(
            format!(" {}ms ", pace_ms),
            Style::default()
                .bg(DEFAULT_THEME.status_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(DEFAULT_THEME.status_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.status_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    // Right side: keybinds plus the run-state badge
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.status_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.status_bg)
        .fg(DEFAULT_THEME.comment);

    let mut right_spans = vec![
        Span::styled(" ⎵ ", key_style),
        Span::styled(" run ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" c ", key_style),
        Span::styled(" cancel ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" r ", key_style),
        Span::styled(" reset ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" g ", key_style),
        Span::styled(" regen ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ⇥ ", key_style),
        Span::styled(" algo ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ↑/↓ ", key_style),
        Span::styled(" pace ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" q ", key_style),
        Span::styled(" quit ", desc_style),
    ];

    let (badge_text, badge_bg) = match badge {
        RunBadge::Ready => (" READY ", DEFAULT_THEME.primary),
        RunBadge::Running => (" RUNNING ", DEFAULT_THEME.secondary),
        RunBadge::Done => (" DONE ", DEFAULT_THEME.success),
        RunBadge::Cancelled => (" CANCELLED ", DEFAULT_THEME.comment),
        RunBadge::Defect => (" DEFECT ", DEFAULT_THEME.error),
    };
    right_spans.push(Span::styled("│", sep_style));
    right_spans.push(Span::styled(
        badge_text,
        Style::default()
            .bg(badge_bg)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    ));

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.status_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
