//! Dashboard widgets that visualise the aggregates: the five summary cards,
//! the decade histogram and the top-author share chart.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};
use ratatui::Frame;

use crate::models::{AuthorFrequency, DecadeBucket, Stats};

use super::helpers::{percent, share_widths, split_columns, truncate, SHARE_PALETTE};

pub(crate) fn draw_stat_cards(frame: &mut Frame, area: Rect, stats: &Stats) {
    let cards = [
        ("Total Books", stats.total.to_string()),
        ("Earliest Year", stats.earliest_label()),
        ("Latest Year", stats.latest_label()),
        ("Average Year", stats.average_label()),
        ("Top Author (filtered)", stats.top_author_label()),
    ];

    for ((title, value), chunk) in cards.into_iter().zip(split_columns(area, 5)) {
        let inner_width = chunk.width.saturating_sub(2) as usize;
        let card = Paragraph::new(Line::from(Span::styled(
            truncate(&value, inner_width),
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(card, chunk);
    }
}

pub(crate) fn draw_decade_chart(frame: &mut Frame, area: Rect, buckets: &[DecadeBucket]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Books by Decade");

    if buckets.is_empty() {
        let message = Paragraph::new("No publication years to chart.")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(message, area);
        return;
    }

    let bars: Vec<Bar> = buckets
        .iter()
        .map(|bucket| {
            Bar::default()
                .value(bucket.count as u64)
                .label(Line::from(format!("{}s", bucket.decade)))
                .text_value(bucket.count.to_string())
        })
        .collect();

    let inner_width = area.width.saturating_sub(2) as usize;
    let slot = (inner_width / buckets.len().max(1)).max(2);
    let bar_width = slot.saturating_sub(1).clamp(1, 6) as u16;

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    frame.render_widget(chart, area);
}

/// Proportional "ring" of the top authors, flattened into one segmented bar
/// plus a legend with counts and shares.
pub(crate) fn draw_author_share(frame: &mut Frame, area: Rect, authors: &[AuthorFrequency]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Top 5 Authors");

    if authors.is_empty() {
        let message = Paragraph::new("No authors to chart.")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(message, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let counts: Vec<usize> = authors.iter().map(|a| a.count).collect();
    let total: usize = counts.iter().sum();
    let widths = share_widths(&counts, inner.width as usize);
    let ring: Vec<Span> = widths
        .iter()
        .enumerate()
        .map(|(idx, width)| {
            Span::styled(
                "█".repeat(*width),
                Style::default().fg(SHARE_PALETTE[idx % SHARE_PALETTE.len()]),
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(ring)), chunks[0]);

    let name_width = (inner.width as usize).saturating_sub(14).max(4);
    let legend: Vec<Line> = authors
        .iter()
        .enumerate()
        .map(|(idx, author)| {
            Line::from(vec![
                Span::styled(
                    "■ ",
                    Style::default().fg(SHARE_PALETTE[idx % SHARE_PALETTE.len()]),
                ),
                Span::raw(truncate(&author.name, name_width)),
                Span::styled(
                    format!("  {} ({}%)", author.count, percent(author.count, total)),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(legend), chunks[1]);
}
