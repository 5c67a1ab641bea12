use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

use crate::catalog::{
    cover_url, work_id_from_key, work_page_url, CoverSize, Dispatcher, FetchOutcome,
};
use crate::config::Config;
use crate::fetch::LoadState;
use crate::models::{AuthorFilter, WorkDetail, MISSING};
use crate::router::{Route, Router};
use crate::stats::{bucket_by_decade, compute_stats, top_author_frequencies};

use super::charts::{draw_author_share, draw_decade_chart, draw_stat_cards};
use super::controls::{author_selector_line, helper_line, QueryInput};
use super::helpers::{key_hints, split_columns, truncate};
use super::screens::{DashboardScreen, DetailScreen, Focus};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
const HEADER_HEIGHT: u16 = 4;
const CONTROLS_HEIGHT: u16 = 4;
const CARDS_HEIGHT: u16 = 3;
const CHARTS_HEIGHT: u16 = 10;
/// Subjects shown per table row.
const ROW_SUBJECTS: usize = 3;
/// Subjects shown on the detail page.
const DETAIL_SUBJECTS: usize = 15;

const TITLE: &str = "OpenLibrary Books Dashboard";

/// Transient footer message plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state: the router, both views, and the dispatcher that
/// runs their fetches.
pub struct App {
    config: Config,
    dispatcher: Dispatcher,
    router: Router,
    dashboard: DashboardScreen,
    detail: Option<DetailScreen>,
    status: Option<StatusMessage>,
}

impl App {
    /// Build the app and kick off the initial search.
    pub fn new(config: Config, dispatcher: Dispatcher) -> Self {
        let mut app = Self {
            dashboard: DashboardScreen::new(config.initial_query.clone()),
            config,
            dispatcher,
            router: Router::new(),
            detail: None,
            status: None,
        };
        app.start_search();
        app
    }

    pub fn route(&self) -> &Route {
        self.router.current()
    }

    /// Apply every finished fetch that is still current.
    pub fn pump(&mut self) {
        for outcome in self.dispatcher.drain() {
            self.apply_outcome(outcome);
        }
    }

    /// Entry point for terminal key presses. Ctrl-C quits anywhere; other
    /// Ctrl/Alt chords are not bound and never reach the query box.
    pub fn handle_key_event(&mut self, event: KeyEvent) -> Result<bool> {
        let chord = event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Ok(true),
            KeyCode::Char(_) if chord => Ok(false),
            code => self.handle_key(code),
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        if matches!(self.router.current(), Route::Book { .. }) {
            self.handle_detail_key(code, &mut exit);
        } else {
            self.handle_dashboard_key(code, &mut exit);
        }
        Ok(exit)
    }

    /// Move to `route`, starting the detail fetch when a work page opens.
    pub fn navigate(&mut self, route: Route) {
        if !self.router.navigate(route.clone()) {
            return;
        }
        self.enter_route(&route);
    }

    /// Return to the previous route. The dashboard keeps its data and does not
    /// search again.
    pub fn go_back(&mut self) {
        self.dispatcher.cancel_work();
        self.detail = None;
        if let Some(route) = self.router.back().cloned() {
            self.enter_route(&route);
        }
    }

    fn enter_route(&mut self, route: &Route) {
        match route {
            Route::Dashboard => {
                self.dispatcher.cancel_work();
                self.detail = None;
            }
            Route::Book { work_id } => {
                self.clear_status();
                self.detail = Some(DetailScreen::loading(work_id.clone()));
                self.dispatcher.work(work_id);
            }
        }
    }

    fn start_search(&mut self) {
        self.dashboard.begin_loading();
        let query = self.dashboard.query.value.clone();
        self.dispatcher.search(&query);
    }

    fn apply_outcome(&mut self, outcome: FetchOutcome) {
        if !self.dispatcher.is_current(&outcome) {
            return;
        }

        match outcome {
            FetchOutcome::Search { query, result, .. } => match result {
                Ok(books) => {
                    info!(%query, count = books.len(), "search results applied");
                    self.dashboard.apply_results(books);
                }
                Err(err) => {
                    warn!(%query, error = %err, "search failed");
                    self.dashboard.apply_error(err.user_message());
                }
            },
            FetchOutcome::Work {
                work_id, result, ..
            } => {
                let Some(detail) = self.detail.as_mut().filter(|d| d.work_id == work_id) else {
                    return;
                };
                detail.state = match result {
                    Ok(work) => LoadState::Ready(work),
                    Err(err) => {
                        warn!(%work_id, error = %err, "work detail failed");
                        LoadState::Failed(err.user_message())
                    }
                };
            }
        }
    }

    fn handle_dashboard_key(&mut self, code: KeyCode, exit: &mut bool) {
        match (self.dashboard.focus, code) {
            (_, KeyCode::Tab) => self.dashboard.focus = self.dashboard.focus.next(),
            (_, KeyCode::BackTab) => self.dashboard.focus = self.dashboard.focus.previous(),
            (Focus::Query, KeyCode::Char(ch)) => {
                if self.dashboard.query.push_char(ch) {
                    self.start_search();
                }
            }
            (Focus::Query, KeyCode::Backspace) => {
                if self.dashboard.query.backspace() {
                    self.start_search();
                }
            }
            (Focus::Query, KeyCode::Enter | KeyCode::Down | KeyCode::Esc) => {
                self.dashboard.focus = Focus::Results;
            }
            (Focus::Author, KeyCode::Left | KeyCode::Up) => self.dashboard.step_author(-1),
            (Focus::Author, KeyCode::Right | KeyCode::Down) => self.dashboard.step_author(1),
            (Focus::Author, KeyCode::Enter | KeyCode::Esc) => {
                self.dashboard.focus = Focus::Results;
            }
            (Focus::Author, KeyCode::Char('q')) => *exit = true,
            (Focus::Results, KeyCode::Char('q') | KeyCode::Esc) => *exit = true,
            (Focus::Results, KeyCode::Up) => self.dashboard.move_selection(-1),
            (Focus::Results, KeyCode::Down) => self.dashboard.move_selection(1),
            (Focus::Results, KeyCode::PageUp) => self.dashboard.move_selection(-10),
            (Focus::Results, KeyCode::PageDown) => self.dashboard.move_selection(10),
            (Focus::Results, KeyCode::Home) => self.dashboard.select_first(),
            (Focus::Results, KeyCode::End) => self.dashboard.select_last(),
            (Focus::Results, KeyCode::Char('/')) => self.dashboard.focus = Focus::Query,
            (Focus::Results, KeyCode::Char('a')) => self.dashboard.focus = Focus::Author,
            (Focus::Results, KeyCode::Enter) => self.open_selected(),
            (Focus::Results, KeyCode::Char('o')) => {
                let work_id = self
                    .dashboard
                    .selected_book()
                    .and_then(|book| work_id_from_key(&book.key))
                    .map(str::to_string);
                match work_id {
                    Some(work_id) => self.open_in_browser(&work_id),
                    None => self.set_status("No book selected.", StatusKind::Error),
                }
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, code: KeyCode, exit: &mut bool) {
        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('b') => {
                self.go_back()
            }
            KeyCode::Up => self.scroll_detail(-1),
            KeyCode::Down => self.scroll_detail(1),
            KeyCode::PageUp => self.scroll_detail(-10),
            KeyCode::PageDown => self.scroll_detail(10),
            KeyCode::Char('o') => {
                if let Some(work_id) = self.detail.as_ref().map(|d| d.work_id.clone()) {
                    self.open_in_browser(&work_id);
                }
            }
            _ => {}
        }
    }

    fn scroll_detail(&mut self, delta: i32) {
        if let Some(detail) = self.detail.as_mut() {
            detail.scroll_by(delta);
        }
    }

    fn open_selected(&mut self) {
        let route = self
            .dashboard
            .selected_book()
            .and_then(|book| Route::for_catalog_key(&book.key));
        match route {
            Some(route) => self.navigate(route),
            None => self.set_status("No book selected.", StatusKind::Error),
        }
    }

    fn open_in_browser(&mut self, work_id: &str) {
        let url = work_page_url(&self.config.api_url, work_id);
        if let Err(err) = open_link(&url) {
            self.set_status(format!("Failed to open link: {err}"), StatusKind::Error);
        } else {
            self.set_status(format!("Opened {url}."), StatusKind::Info);
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match self.router.current() {
            Route::Dashboard => self.draw_dashboard(frame, content_area),
            Route::Book { .. } => match &self.detail {
                Some(detail) => self.draw_detail(frame, content_area, detail),
                None => self.draw_dashboard(frame, content_area),
            },
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(CONTROLS_HEIGHT),
                Constraint::Length(CARDS_HEIGHT),
                Constraint::Length(CHARTS_HEIGHT),
                Constraint::Min(3),
            ])
            .split(area);

        draw_header(frame, chunks[0], "Search & filter books; explore quick stats.");
        self.draw_controls(frame, chunks[1], true);

        let filtered = self.dashboard.filtered();
        draw_stat_cards(frame, chunks[2], &compute_stats(&filtered));

        let charts = split_columns(chunks[3], 2);
        draw_decade_chart(frame, charts[0], &bucket_by_decade(&filtered));
        draw_author_share(frame, charts[1], &top_author_frequencies(&filtered));

        self.draw_results(frame, chunks[4]);
    }

    fn draw_controls(&self, frame: &mut Frame, area: Rect, enabled: bool) {
        let columns = split_columns(area, 2);
        let dashboard = &self.dashboard;
        let query_focused = enabled && dashboard.focus == Focus::Query;
        let author_focused = enabled && dashboard.focus == Focus::Author;

        let (query_help, author_help) = if enabled {
            (
                "Results update as you type (via API).",
                "Filter uses a different attribute than search (author).",
            )
        } else {
            (
                "Results update as you type (disabled on detail view).",
                "Filter uses a different attribute than search (disabled here).",
            )
        };

        let query_block = control_block("Search (title/keywords)", query_focused);
        let query_inner = query_block.inner(columns[0]);
        // The detail page carries its own inert copy of the controls.
        let query_line = if enabled {
            dashboard.query.build_line(query_focused, true)
        } else {
            QueryInput::default().build_line(false, false)
        };
        let query =
            Paragraph::new(vec![query_line, helper_line(query_help, enabled)]).block(query_block);
        frame.render_widget(query, columns[0]);

        let (options, selected) = if enabled {
            (dashboard.author_options(), dashboard.filter.clone())
        } else {
            (vec![AuthorFilter::All], AuthorFilter::All)
        };
        let author = Paragraph::new(vec![
            author_selector_line(&options, &selected, author_focused, enabled),
            helper_line(author_help, enabled),
        ])
        .block(control_block("Filter by author", author_focused));
        frame.render_widget(author, columns[1]);

        if query_focused && query_inner.width > 0 && query_inner.height > 0 {
            let offset = (dashboard.query.len() as u16).min(query_inner.width.saturating_sub(1));
            frame.set_cursor_position((query_inner.x + offset, query_inner.y));
        }
    }

    fn draw_results(&self, frame: &mut Frame, area: Rect) {
        let dashboard = &self.dashboard;
        let block = Block::default().borders(Borders::ALL);

        let message = if dashboard.is_loading() {
            Some(Line::from("Loading…"))
        } else if let Some(error) = dashboard.error() {
            Some(Line::from(Span::styled(
                format!("Error: {error}"),
                Style::default().fg(Color::Red),
            )))
        } else if dashboard.filtered().is_empty() {
            Some(Line::from("No results. Try a different search or author."))
        } else {
            None
        };

        if let Some(message) = message {
            let paragraph = Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(block.title("Results"));
            frame.render_widget(paragraph, area);
            return;
        }

        let rows_data = dashboard.visible_rows();
        let focused = dashboard.focus == Focus::Results;

        let title_width = (area.width as usize * 35 / 100).saturating_sub(2).max(8);
        let rows: Vec<Row> = rows_data
            .iter()
            .map(|book| {
                let cover = match cover_url(&self.config.covers_url, book.cover_ref, CoverSize::Medium)
                {
                    Some(url) => Cell::from(
                        url.rsplit('/')
                            .next()
                            .unwrap_or_default()
                            .to_string(),
                    ),
                    None => Cell::from(Span::styled(
                        "No cover",
                        Style::default().fg(Color::DarkGray),
                    )),
                };
                Row::new(vec![
                    cover,
                    Cell::from(Span::styled(
                        truncate(book.display_title(), title_width),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Cell::from(book.display_authors()),
                    Cell::from(book.display_year()),
                    Cell::from(Span::styled(
                        book.display_subjects(ROW_SUBJECTS),
                        Style::default().fg(Color::Gray),
                    )),
                ])
            })
            .collect();

        let header = Row::new(vec!["Cover", "Title", "Author(s)", "Year", "Subjects"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let highlight = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };

        let table = Table::new(
            rows,
            [
                Constraint::Length(14),
                Constraint::Percentage(35),
                Constraint::Percentage(25),
                Constraint::Length(6),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(block.title(format!(
            "Results ({} of {})",
            rows_data.len(),
            dashboard.filtered().len()
        )))
        .row_highlight_style(highlight)
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(Some(dashboard.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect, detail: &DetailScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(CONTROLS_HEIGHT),
                Constraint::Length(1),
                Constraint::Min(3),
            ])
            .split(area);

        draw_header(frame, chunks[0], "Detail view");
        self.draw_controls(frame, chunks[1], false);

        let back = Paragraph::new(Line::from(Span::styled(
            "← Back to results",
            Style::default().fg(Color::Blue),
        )));
        frame.render_widget(back, chunks[2]);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Work {}", detail.work_id));

        let lines = match &detail.state {
            LoadState::Idle | LoadState::Loading => vec![Line::from("Loading…")],
            LoadState::Failed(error) => vec![Line::from(Span::styled(
                format!("Error: {error}"),
                Style::default().fg(Color::Red),
            ))],
            LoadState::Ready(work) => detail_lines(work, &detail.work_id),
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((detail.scroll, 0));
        frame.render_widget(paragraph, chunks[3]);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from(Span::styled(
                "Data: OpenLibrary Search API.",
                Style::default().fg(Color::DarkGray),
            ))
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        match (self.router.current(), self.dashboard.focus) {
            (Route::Book { .. }, _) => key_hints(&[
                ("Esc", "Back"),
                ("↑↓", "Scroll"),
                ("o", "Open in Browser"),
                ("q", "Quit"),
            ]),
            (Route::Dashboard, Focus::Query) => key_hints(&[
                ("type", "Search"),
                ("Tab", "Next Control"),
                ("Enter", "Results"),
                ("Ctrl-C", "Quit"),
            ]),
            (Route::Dashboard, Focus::Author) => key_hints(&[
                ("←→", "Change Author"),
                ("Tab", "Next Control"),
                ("Enter", "Results"),
                ("q", "Quit"),
            ]),
            (Route::Dashboard, Focus::Results) => key_hints(&[
                ("↑↓", "Select"),
                ("Enter", "Details"),
                ("o", "Open in Browser"),
                ("/", "Search"),
                ("a", "Author"),
                ("Tab", "Next Control"),
                ("q", "Quit"),
            ]),
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

fn draw_header(frame: &mut Frame, area: Rect, subtitle: &str) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            subtitle.to_string(),
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Left)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn control_block(title: &str, focused: bool) -> Block<'static> {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string());
    if focused {
        block.border_style(Style::default().fg(Color::Yellow))
    } else {
        block
    }
}

fn detail_lines(work: &WorkDetail, work_id: &str) -> Vec<Line<'static>> {
    let label = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(
            work.display_title().to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Description:", label)),
    ];
    lines.extend(
        work.display_description()
            .lines()
            .map(|line| Line::from(line.to_string())),
    );

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Subjects:", label)));
    lines.push(Line::from(work.display_subjects(DETAIL_SUBJECTS)));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Excerpts:", label)));
    if work.excerpts.is_empty() {
        lines.push(Line::from(MISSING));
    } else {
        let italic = Style::default().add_modifier(Modifier::ITALIC);
        for excerpt in &work.excerpts {
            lines.extend(
                excerpt
                    .text
                    .lines()
                    .map(|line| Line::from(Span::styled(line.to_string(), italic))),
            );
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Source: OpenLibrary Works API /works/{work_id}.json"),
        Style::default().fg(Color::DarkGray),
    )));
    lines
}
