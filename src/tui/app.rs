use crate::api::ArtworkSource;
use crate::tui::{
    components::{render_table, BarButton, BarTarget, NumberPrompt, PaginationBar, PromptResult, CHECKBOX_COLUMNS},
    events::Event,
    keys::{Action, KeyMap},
    styles::Theme,
    utils::layout::{centered_rect_percent, contains},
    Frame,
};
use crate::viewer::{
    accumulate_rows_with_progress, AccumulationProgress, LoadOutcome, LoadStatus, PageRequest, ViewerState,
};
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, TableState};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// How long a status message stays up
const STATUS_TTL: Duration = Duration::from_secs(5);

/// Which input currently owns the keyboard
#[derive(Debug, Clone)]
pub enum Mode {
    Browse,
    SelectRows(NumberPrompt),
    GotoPage(NumberPrompt),
}

/// Main application state and controller
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    /// Key mappings for the application
    pub key_map: KeyMap,

    /// Current theme for styling
    pub theme: Theme,

    /// Table, window and selection state
    pub state: ViewerState,

    /// Whether the help overlay is shown
    pub show_help: bool,

    mode: Mode,
    status_message: Option<(String, Instant)>,
    source: Arc<dyn ArtworkSource>,
    event_sender: mpsc::UnboundedSender<Event>,
    fetch_task: Option<JoinHandle<()>>,
    accumulate_task: Option<JoinHandle<()>>,
    progress: Option<AccumulationProgress>,
    table_state: TableState,
    bar_buttons: Vec<BarButton>,
    rows_area: Rect,
}

impl App {
    /// Create a new application instance
    pub fn new(
        source: Arc<dyn ArtworkSource>,
        event_sender: mpsc::UnboundedSender<Event>,
        start_page: u32,
        window_size: u32,
    ) -> Self {
        Self {
            should_quit: false,
            key_map: KeyMap::default(),
            theme: Theme::default(),
            state: ViewerState::new(start_page, window_size),
            show_help: false,
            mode: Mode::Browse,
            status_message: None,
            source,
            event_sender,
            fetch_task: None,
            accumulate_task: None,
            progress: None,
            table_state: TableState::default(),
            bar_buttons: Vec::new(),
            rows_area: Rect::default(),
        }
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_ref().map(|(m, _)| m.as_str())
    }

    pub fn is_accumulating(&self) -> bool {
        self.accumulate_task.is_some()
    }

    /// Request the first page
    pub fn start(&mut self) {
        let request = self.state.initial_request();
        self.dispatch(Some(request));
    }

    /// Run a page request on a background task, replacing any in-flight one
    fn dispatch(&mut self, request: Option<PageRequest>) {
        let Some(request) = request else {
            return;
        };

        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }

        let source = Arc::clone(&self.source);
        let sender = self.event_sender.clone();
        self.fetch_task = Some(tokio::spawn(async move {
            let result = source
                .fetch_page(request.page)
                .await
                .map_err(|e| e.to_string());
            let _ = sender.send(Event::PageLoaded {
                request_id: request.id,
                result,
            });
        }));
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Handle incoming events; returns true when the app should exit
    pub async fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event),

            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),

            Event::Resize(width, height) => {
                debug!("Terminal resized to {}x{}", width, height);
            }

            Event::Tick => {
                if let Some((_, since)) = &self.status_message {
                    if since.elapsed() > STATUS_TTL {
                        self.status_message = None;
                    }
                }
            }

            Event::PageLoaded { request_id, result } => match result {
                Ok(page) => match self.state.apply_loaded(request_id, page) {
                    LoadOutcome::Stale => {}
                    LoadOutcome::Shown => self.fetch_task = None,
                    LoadOutcome::Clamped(request) => {
                        self.set_status(format!("Only {} pages available", request.page));
                        self.dispatch(Some(request));
                    }
                },
                Err(message) => {
                    if let Some(page) = self.state.apply_failed(request_id, message.clone()) {
                        error!("Failed to load page {}: {}", page, message);
                        self.fetch_task = None;
                    }
                }
            },

            // a cancelled run may still have events queued
            Event::AccumulationProgress(_) | Event::AccumulationFinished(_) if !self.is_accumulating() => {
                debug!("Dropping event from a cancelled row selection");
            }

            Event::AccumulationProgress(progress) => {
                self.progress = Some(progress);
            }

            Event::AccumulationFinished(result) => {
                self.accumulate_task = None;
                self.progress = None;
                match result {
                    Ok(accumulation) => {
                        if accumulation.last_page.is_some() {
                            if let Some(task) = self.fetch_task.take() {
                                task.abort();
                            }
                        }
                        let added = self.state.apply_accumulation(accumulation);
                        let total = self.state.selection().len();
                        self.set_status(format!("Selected {} more rows ({} total)", added, total));
                    }
                    Err(message) => {
                        error!("Row selection failed: {}", message);
                        self.set_status(format!("Row selection failed: {}", message));
                    }
                }
            }
        }

        Ok(self.should_quit)
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        let mode = std::mem::replace(&mut self.mode, Mode::Browse);
        match mode {
            Mode::Browse => {
                if let Some(action) = self.key_map.action_for(&key) {
                    self.perform(action);
                }
            }
            Mode::SelectRows(mut prompt) => match prompt.handle_key(key) {
                PromptResult::Editing => self.mode = Mode::SelectRows(prompt),
                PromptResult::Submitted(count) => self.start_accumulation(count as usize),
                PromptResult::Cancelled => {}
            },
            Mode::GotoPage(mut prompt) => match prompt.handle_key(key) {
                PromptResult::Editing => self.mode = Mode::GotoPage(prompt),
                PromptResult::Submitted(page) => {
                    let request = self.state.jump_to(page);
                    self.dispatch(request);
                }
                PromptResult::Cancelled => {}
            },
        }
    }

    /// Apply a key-map action in browse mode
    pub fn perform(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::CursorUp => self.state.move_cursor(-1),
            Action::CursorDown => self.state.move_cursor(1),
            Action::ToggleRow => {
                self.state.toggle_current();
            }
            Action::ToggleAll => self.state.toggle_all(),
            Action::PrevPage => {
                let request = self.state.prev_page();
                self.dispatch(request);
            }
            Action::NextPage => {
                let request = self.state.next_page();
                self.dispatch(request);
            }
            Action::PageButton(index) => {
                if let Some(&page) = self.state.visible_pages().get(index) {
                    let request = self.state.click_page(page);
                    self.dispatch(request);
                }
            }
            Action::GotoPage => {
                self.mode = Mode::GotoPage(NumberPrompt::new("Go to page", "Page number"));
            }
            Action::SelectRows => {
                if self.is_accumulating() {
                    self.set_status("Row selection already running");
                } else {
                    self.mode = Mode::SelectRows(NumberPrompt::new("Select Rows", "Enter number of rows"));
                }
            }
            Action::ClearSelection => {
                self.state.clear_selection();
                self.set_status("Selection cleared");
            }
            Action::CancelSelection => {
                if let Some(task) = self.accumulate_task.take() {
                    task.abort();
                    self.progress = None;
                    info!("Row selection cancelled");
                    self.set_status("Row selection cancelled");
                }
            }
            Action::Retry => {
                let request = self.state.retry();
                self.dispatch(request);
            }
        }
    }

    /// Start "select N rows" from the active page on a background task
    fn start_accumulation(&mut self, target: usize) {
        if self.is_accumulating() {
            return;
        }

        let from_page = self.state.active_page();
        let selection = self.state.selection().clone();
        if target <= selection.len() {
            self.set_status(format!("{} rows already selected", selection.len()));
            return;
        }

        info!("Selecting {} rows starting at page {}", target, from_page);
        let source = Arc::clone(&self.source);
        let sender = self.event_sender.clone();
        self.accumulate_task = Some(tokio::spawn(async move {
            let progress_sender = sender.clone();
            let result = accumulate_rows_with_progress(source.as_ref(), from_page, target, &selection, |progress| {
                let _ = progress_sender.send(Event::AccumulationProgress(progress));
            })
            .await
            .map_err(|e| e.to_string());
            let _ = sender.send(Event::AccumulationFinished(result));
        }));
    }

    fn handle_mouse_event(&mut self, event: MouseEvent) {
        if !matches!(self.mode, Mode::Browse) {
            return;
        }

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self
                    .bar_buttons
                    .iter()
                    .find(|b| contains(b.area, event.column, event.row))
                    .map(|b| b.target);
                if let Some(target) = hit {
                    let request = match target {
                        BarTarget::Prev => self.state.prev_page(),
                        BarTarget::Next => self.state.next_page(),
                        BarTarget::Page(page) => self.state.click_page(page),
                    };
                    self.dispatch(request);
                    return;
                }

                let area = self.rows_area;
                if area.height > 0 && event.row.saturating_add(1) == area.y {
                    if event.column >= area.x && event.column < area.x + CHECKBOX_COLUMNS {
                        self.perform(Action::ToggleAll);
                    } else if contains(Rect::new(area.x, event.row, area.width, 1), event.column, event.row) {
                        self.perform(Action::SelectRows);
                    }
                    return;
                }

                if contains(self.rows_area, event.column, event.row) {
                    let index = self.table_state.offset() + usize::from(event.row - self.rows_area.y);
                    if index < self.state.rows().len() {
                        let delta = index as isize - self.state.cursor() as isize;
                        self.state.move_cursor(delta);
                        if event.column < self.rows_area.x + CHECKBOX_COLUMNS {
                            self.state.toggle_current();
                        }
                    }
                }
            }
            MouseEventKind::ScrollUp => self.state.move_cursor(-1),
            MouseEventKind::ScrollDown => self.state.move_cursor(1),
            _ => {}
        }
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(3),    // Table
                Constraint::Length(1), // Pagination bar
                Constraint::Length(1), // Status bar
            ])
            .split(frame.size());

        self.render_title(frame, chunks[0]);
        self.rows_area = render_table(frame, chunks[1], &self.state, &mut self.table_state, &self.theme);

        self.bar_buttons = match self.state.total_pages() {
            Some(total) => {
                let visible = self.state.visible_pages();
                PaginationBar::new(&visible, self.state.active_page(), total).render(frame, chunks[2], &self.theme)
            }
            None => Vec::new(),
        };

        self.render_status_bar(frame, chunks[3]);

        match &self.mode {
            Mode::SelectRows(prompt) | Mode::GotoPage(prompt) => {
                let area = frame.size();
                prompt.render(frame, area, &self.theme);
            }
            Mode::Browse => {}
        }

        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled("Art Institute of Chicago", self.theme.header_style())];
        if let Some(page) = self.state.current_page() {
            spans.push(Span::styled(
                format!("  {} artworks", page.pagination.total),
                self.theme.text_style(),
            ));
        }
        spans.push(Span::styled(format!("  {}", self.source.name()), self.theme.dim_style()));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Render the status bar
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let status_text = if let Some(progress) = &self.progress {
            format!(
                "Selecting rows… page {}/{} | {}/{} selected",
                progress.page, progress.total_pages, progress.selected, progress.target
            )
        } else if let Some(message) = self.status_message() {
            message.to_string()
        } else {
            let mut parts = vec![format!("{} selected", self.state.selection().len())];
            match self.state.status() {
                LoadStatus::Loading { page } => parts.push(format!("loading page {}", page)),
                LoadStatus::Failed { .. } => parts.push("request failed, r to retry".to_string()),
                LoadStatus::Idle => {
                    if let Some(at) = self.state.loaded_at() {
                        parts.push(format!("loaded {}", at.format("%H:%M:%S")));
                    }
                }
            }
            parts.push("? for help".to_string());
            parts.push("q to quit".to_string());
            parts.join(" | ")
        };

        let status_paragraph = Paragraph::new(status_text).style(self.theme.status_bar_style());
        frame.render_widget(status_paragraph, area);
    }

    /// Render help overlay
    fn render_help_overlay(&self, frame: &mut Frame) {
        let help_area = centered_rect_percent(60, 70, frame.size());

        let lines: Vec<Line> = self
            .key_map
            .help_entries()
            .into_iter()
            .map(|(keys, description)| {
                Line::from(vec![
                    Span::styled(format!("{:>8}  ", keys), self.theme.info_style()),
                    Span::styled(description, self.theme.text_style()),
                ])
            })
            .collect();

        let help_block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style())
            .title(" Help ");

        frame.render_widget(Clear, help_area);
        frame.render_widget(Paragraph::new(lines).block(help_block), help_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeSource;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn app_with(source: FakeSource) -> (App, mpsc::UnboundedReceiver<Event>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let app = App::new(Arc::new(source), sender, 1, 10);
        (app, receiver)
    }

    /// Feed background events back into the app until `done` holds
    async fn pump<F>(app: &mut App, receiver: &mut mpsc::UnboundedReceiver<Event>, done: F)
    where
        F: Fn(&App) -> bool,
    {
        while !done(app) {
            let event = receiver.recv().await.unwrap();
            app.handle_event(event).await.unwrap();
        }
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    /// Draw one frame so click regions are known. With a 120x30 screen the
    /// table header sits on row 2 and data rows start on row 3.
    fn draw(app: &mut App) {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }

    fn button(app: &App, target: BarTarget) -> BarButton {
        *app.bar_buttons.iter().find(|b| b.target == target).unwrap()
    }

    async fn loaded_app(source: FakeSource) -> (App, mpsc::UnboundedReceiver<Event>) {
        let (mut app, mut receiver) = app_with(source);
        app.start();
        pump(&mut app, &mut receiver, |app| !app.state.is_loading()).await;
        draw(&mut app);
        (app, receiver)
    }

    #[tokio::test]
    async fn test_start_loads_first_page() {
        let (mut app, mut receiver) = app_with(FakeSource::new(600, 12));
        app.start();
        pump(&mut app, &mut receiver, |app| !app.state.is_loading()).await;

        assert_eq!(app.state.rows().len(), 12);
        assert_eq!(app.state.total_pages(), Some(50));
    }

    #[tokio::test]
    async fn test_tenth_button_slides_window() {
        let (mut app, mut receiver) = app_with(FakeSource::new(600, 12));
        app.start();
        pump(&mut app, &mut receiver, |app| !app.state.is_loading()).await;

        app.handle_event(key('0')).await.unwrap();
        pump(&mut app, &mut receiver, |app| !app.state.is_loading()).await;

        assert_eq!(app.state.active_page(), 10);
        assert_eq!(app.state.visible_pages(), (2..=11).collect::<Vec<_>>());
        assert_eq!(app.state.current_page().unwrap().pagination.current_page, 10);
    }

    #[tokio::test]
    async fn test_select_rows_popup_accumulates() {
        let (mut app, mut receiver) = app_with(FakeSource::new(600, 12));
        app.start();
        pump(&mut app, &mut receiver, |app| !app.state.is_loading()).await;

        app.handle_event(key('s')).await.unwrap();
        assert!(matches!(app.mode, Mode::SelectRows(_)));
        app.handle_event(key('2')).await.unwrap();
        app.handle_event(key('5')).await.unwrap();
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)))
            .await
            .unwrap();
        assert!(app.is_accumulating());

        pump(&mut app, &mut receiver, |app| !app.is_accumulating()).await;
        assert_eq!(app.state.selection().len(), 25);
        assert_eq!(app.state.active_page(), 3);
        assert_eq!(app.status_message(), Some("Selected 25 more rows (25 total)"));
    }

    #[tokio::test]
    async fn test_failed_load_then_retry() {
        let (mut app, mut receiver) = app_with(FakeSource::new(600, 12).failing_on(1));
        app.start();
        pump(&mut app, &mut receiver, |app| !app.state.is_loading()).await;
        assert!(matches!(app.state.status(), LoadStatus::Failed { page: 1, .. }));

        app.handle_event(key('r')).await.unwrap();
        assert!(app.state.is_loading());
    }

    #[tokio::test]
    async fn test_newer_request_wins() {
        let (mut app, mut receiver) =
            app_with(FakeSource::new(600, 12).with_delay(Duration::from_millis(20)));
        app.start();
        app.handle_event(key('l')).await.unwrap();
        app.handle_event(key('l')).await.unwrap();

        pump(&mut app, &mut receiver, |app| !app.state.is_loading()).await;
        assert_eq!(app.state.current_page().unwrap().pagination.current_page, 3);
    }

    #[tokio::test]
    async fn test_quit_key() {
        let (mut app, _receiver) = app_with(FakeSource::new(10, 5));
        assert!(app.handle_event(key('q')).await.unwrap());
    }

    #[tokio::test]
    async fn test_clicking_page_button_loads_that_page() {
        let (mut app, mut receiver) = loaded_app(FakeSource::new(600, 12)).await;
        let page_three = button(&app, BarTarget::Page(3));
        assert_eq!(page_three.area.y, 28);

        app.handle_event(click(page_three.area.x + 1, page_three.area.y)).await.unwrap();
        assert_eq!(app.state.active_page(), 3);
        assert!(app.state.is_loading());

        pump(&mut app, &mut receiver, |app| !app.state.is_loading()).await;
        assert_eq!(app.state.current_page().unwrap().pagination.current_page, 3);
    }

    #[tokio::test]
    async fn test_clicking_prev_on_first_page_does_nothing() {
        let (mut app, _receiver) = loaded_app(FakeSource::new(600, 12)).await;
        let prev = button(&app, BarTarget::Prev);

        app.handle_event(click(prev.area.x, prev.area.y)).await.unwrap();
        assert_eq!(app.state.active_page(), 1);
        assert!(!app.state.is_loading());
    }

    #[tokio::test]
    async fn test_clicking_checkbox_toggles_that_row() {
        let (mut app, _receiver) = loaded_app(FakeSource::new(600, 12)).await;
        assert_eq!(app.rows_area, Rect::new(1, 3, 118, 24));

        // third data row, inside the checkbox column
        app.handle_event(click(3, 5)).await.unwrap();
        assert_eq!(app.state.cursor(), 2);
        assert_eq!(app.state.selection().len(), 1);
        assert!(app.state.selection().contains(app.state.rows()[2].id));

        // a click on the title cell only moves the cursor
        app.handle_event(click(40, 7)).await.unwrap();
        assert_eq!(app.state.cursor(), 4);
        assert_eq!(app.state.selection().len(), 1);
    }

    #[tokio::test]
    async fn test_clicking_header() {
        let (mut app, _receiver) = loaded_app(FakeSource::new(600, 12)).await;

        app.handle_event(click(3, 2)).await.unwrap();
        assert!(app.state.all_selected());
        assert_eq!(app.state.selection().len(), 12);

        app.handle_event(click(10, 2)).await.unwrap();
        assert!(matches!(app.mode, Mode::SelectRows(_)));
    }

    #[tokio::test]
    async fn test_start_page_past_the_end_lands_on_last_page() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let source = FakeSource::new(600, 12).empty_past_end();
        let mut app = App::new(Arc::new(source), sender, 60, 10);
        app.start();
        pump(&mut app, &mut receiver, |app| !app.state.is_loading()).await;

        assert_eq!(app.state.active_page(), 50);
        assert_eq!(app.state.visible_pages(), (41..=50).collect::<Vec<_>>());
        assert_eq!(app.state.current_page().unwrap().pagination.current_page, 50);
        assert_eq!(app.state.rows().len(), 12);
    }

    #[tokio::test]
    async fn test_escape_cancels_row_selection() {
        let (mut app, mut receiver) =
            loaded_app(FakeSource::new(600, 12).with_delay(Duration::from_millis(20))).await;

        app.handle_event(key('s')).await.unwrap();
        app.handle_event(key('9')).await.unwrap();
        app.handle_event(key('0')).await.unwrap();
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)))
            .await
            .unwrap();
        assert!(app.is_accumulating());

        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
            .await
            .unwrap();
        assert!(!app.is_accumulating());
        assert_eq!(app.status_message(), Some("Row selection cancelled"));

        tokio::time::sleep(Duration::from_millis(100)).await;
        while let Ok(event) = receiver.try_recv() {
            app.handle_event(event).await.unwrap();
        }
        assert!(app.state.selection().is_empty());
        assert_eq!(app.state.active_page(), 1);

        app.handle_event(key('s')).await.unwrap();
        assert!(matches!(app.mode, Mode::SelectRows(_)));
    }
}
