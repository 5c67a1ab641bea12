use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::AuthorFilter;

const QUERY_PLACEHOLDER: &str = "e.g., fantasy, love, space, history...";

/// Free-text search box. Editing it is what triggers a new search.
#[derive(Default, Clone, Debug)]
pub(crate) struct QueryInput {
    pub(crate) value: String,
}

impl QueryInput {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Append a character. Control characters are ignored; returns whether the
    /// value changed.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            false
        } else {
            self.value.push(ch);
            true
        }
    }

    /// Remove the last character; returns whether the value changed.
    pub(crate) fn backspace(&mut self) -> bool {
        self.value.pop().is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// Line shown inside the input box. Focus highlights the text; a disabled
    /// input is dimmed regardless.
    pub(crate) fn build_line(&self, focused: bool, enabled: bool) -> Line<'static> {
        if self.value.is_empty() {
            return Line::from(Span::styled(
                QUERY_PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(Span::styled(self.value.clone(), control_style(focused, enabled)))
    }
}

/// Author dropdown rendered as a `◀ value ▶` stepper.
pub(crate) fn author_selector_line(
    options: &[AuthorFilter],
    selected: &AuthorFilter,
    focused: bool,
    enabled: bool,
) -> Line<'static> {
    let position = options
        .iter()
        .position(|option| option == selected)
        .map(|idx| format!("  ({}/{})", idx + 1, options.len()))
        .unwrap_or_default();

    let arrow_style = if focused && enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Line::from(vec![
        Span::styled("◀ ", arrow_style),
        Span::styled(selected.to_string(), control_style(focused, enabled)),
        Span::styled(" ▶", arrow_style),
        Span::styled(position, Style::default().fg(Color::DarkGray)),
    ])
}

/// Step through `options` from `current`, wrapping at both ends.
pub(crate) fn step_option(
    options: &[AuthorFilter],
    current: &AuthorFilter,
    delta: isize,
) -> AuthorFilter {
    if options.is_empty() {
        return AuthorFilter::All;
    }
    let len = options.len() as isize;
    let index = options
        .iter()
        .position(|option| option == current)
        .unwrap_or(0) as isize;
    let next = (index + delta).rem_euclid(len) as usize;
    options[next].clone()
}

/// Small helper text printed under a control.
pub(crate) fn helper_line(text: &str, enabled: bool) -> Line<'static> {
    let style = if enabled {
        Style::default().fg(Color::Gray)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    };
    Line::from(Span::styled(text.to_string(), style))
}

fn control_style(focused: bool, enabled: bool) -> Style {
    if !enabled {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}
