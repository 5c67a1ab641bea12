use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Colours cycled through by the author share chart.
pub(crate) const SHARE_PALETTE: [Color; 5] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::LightBlue,
];

/// Split `width` cells between `counts` proportionally. Largest remainders
/// get the leftover cells so the segments always fill the row exactly.
pub(crate) fn share_widths(counts: &[usize], width: usize) -> Vec<usize> {
    let total: usize = counts.iter().sum();
    if total == 0 || width == 0 {
        return vec![0; counts.len()];
    }

    let mut widths: Vec<usize> = counts.iter().map(|c| c * width / total).collect();
    let mut remainders: Vec<(usize, usize)> = counts
        .iter()
        .enumerate()
        .map(|(idx, c)| (idx, (c * width) % total))
        .collect();
    // Stable sort keeps earlier entries first among equal remainders.
    remainders.sort_by(|a, b| b.1.cmp(&a.1));

    let assigned: usize = widths.iter().sum();
    for (idx, _) in remainders.into_iter().take(width - assigned) {
        widths[idx] += 1;
    }
    widths
}

/// Percentage of `part` in `total`, rounded to the nearest whole number.
pub(crate) fn percent(part: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else {
        (part * 100 + total / 2) / total
    }
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(max - 1).collect();
    cut.push('…');
    cut
}

/// Render `[key] label` pairs in the footer style.
pub(crate) fn key_hints(hints: &[(&str, &str)]) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (idx, (key, label)) in hints.iter().enumerate() {
        spans.push(Span::styled(format!("[{key}]"), key_style));
        let separator = if idx + 1 == hints.len() { "" } else { "   " };
        spans.push(Span::raw(format!(" {label}{separator}")));
    }
    Line::from(spans)
}

/// Split `area` into `count` equal-width columns.
pub(crate) fn split_columns(area: Rect, count: usize) -> Vec<Rect> {
    let count = count.max(1) as u32;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, count); count as usize])
        .split(area)
        .to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_widths_fill_the_row() {
        let widths = share_widths(&[3, 1, 1], 10);
        assert_eq!(widths.iter().sum::<usize>(), 10);
        assert_eq!(widths, vec![6, 2, 2]);

        let uneven = share_widths(&[1, 1, 1], 10);
        assert_eq!(uneven, vec![4, 3, 3]);
    }

    #[test]
    fn share_widths_handle_empty_input() {
        assert_eq!(share_widths(&[], 10), Vec::<usize>::new());
        assert_eq!(share_widths(&[0, 0], 10), vec![0, 0]);
        assert_eq!(share_widths(&[2, 5], 0), vec![0, 0]);
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(5, 0), 0);
    }

    #[test]
    fn truncate_marks_the_cut() {
        assert_eq!(truncate("Dune", 10), "Dune");
        assert_eq!(truncate("The Left Hand of Darkness", 8), "The Lef…");
        assert_eq!(truncate("abc", 0), "");
    }
}
