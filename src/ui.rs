//! Terminal UI built on ratatui.
//!
//! Architecture:
//! - Main loop: renders frames and handles input events
//! - Fetches: spawned tokio tasks, one per request
//! - Communication via an mpsc channel (completions -> main loop)
//!
//! Every spawned fetch captures a generation number; the owning screen keeps
//! the generation of its latest request and discards completions carrying any
//! other value. That is the whole cancellation story: late responses to
//! superseded requests never touch visible state, and the transport itself is
//! never aborted.

mod browse;
mod detail;
mod form;

pub use browse::{no_results_message, BrowseScreen, FETCH_LISTINGS_FAILED};
pub use detail::{DetailScreen, FETCH_LISTING_FAILED};
pub use form::{AddScreen, FormField};

use crate::api::{ApiClient, ApiError};
use crate::config::Config;
use crate::listing::{Listing, ListingDraft, Summary};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{DefaultTerminal, Frame};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// The three screens, one per client route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Browse,
    Detail(u64),
    Add,
}

/// Completion message from a spawned fetch task.
///
/// Each variant carries the generation captured when the fetch was spawned.
#[derive(Debug)]
pub enum ApiMsg {
    Listings {
        generation: u64,
        result: Result<Vec<Listing>, ApiError>,
    },
    Listing {
        generation: u64,
        result: Result<Listing, ApiError>,
    },
    Summary {
        generation: u64,
        result: Result<Summary, ApiError>,
    },
    Created {
        generation: u64,
        result: Result<Listing, ApiError>,
    },
}

pub struct App {
    client: ApiClient,
    tx: UnboundedSender<ApiMsg>,
    pub route: Route,
    pub browse: BrowseScreen,
    pub detail: Option<DetailScreen>,
    pub form: Option<AddScreen>,
    next_generation: u64,
    should_quit: bool,
}

impl App {
    pub fn new(client: ApiClient, tx: UnboundedSender<ApiMsg>) -> Self {
        Self {
            client,
            tx,
            route: Route::Browse,
            browse: BrowseScreen::default(),
            detail: None,
            form: None,
            next_generation: 0,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Unique across the whole app lifetime, so a completion from an
    /// abandoned screen can never collide with a fresh screen's request.
    fn next_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    /// Enter the browse screen with a fresh query and fetch the collection
    pub fn open_browse(&mut self) {
        self.route = Route::Browse;
        self.detail = None;
        self.form = None;
        self.browse = BrowseScreen::default();
        self.spawn_list_fetch();
    }

    /// Enter the detail screen for one listing and fetch it
    pub fn open_detail(&mut self, id: u64) {
        self.route = Route::Detail(id);
        self.form = None;
        self.detail = Some(DetailScreen::new(id));
        self.spawn_detail_fetch(id);
    }

    /// Enter the creation form
    pub fn open_add(&mut self) {
        self.route = Route::Add;
        self.detail = None;
        self.form = Some(AddScreen::default());
    }

    /// Issue a collection fetch scoped by the current query.
    ///
    /// Called on entering the browse screen and on every query edit; each
    /// call supersedes the previous request.
    fn spawn_list_fetch(&mut self) {
        let generation = self.next_generation();
        self.browse.generation = generation;
        self.browse.loading = true;
        self.browse.error = None;

        let client = self.client.clone();
        let tx = self.tx.clone();
        let query = self.browse.query.clone();
        tokio::spawn(async move {
            let result = client.list(Some(&query)).await;
            let _ = tx.send(ApiMsg::Listings { generation, result });
        });
    }

    fn spawn_detail_fetch(&mut self, id: u64) {
        let generation = self.next_generation();
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        detail.generation = generation;

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.get(id).await;
            let _ = tx.send(ApiMsg::Listing { generation, result });
        });
    }

    /// Request a summary for the loaded listing; ignored while one is in flight
    fn request_summary(&mut self, id: u64) {
        let ready = self
            .detail
            .as_ref()
            .is_some_and(|d| d.listing.is_some() && !d.summary_inflight);
        if !ready {
            return;
        }
        let generation = self.next_generation();
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        detail.summary_generation = generation;
        detail.summary_inflight = true;

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.summarize(id).await;
            let _ = tx.send(ApiMsg::Summary { generation, result });
        });
    }

    /// Validate the form and submit it; ignored while a submit is in flight
    fn submit_form(&mut self) {
        let draft = {
            let Some(form) = self.form.as_mut() else {
                return;
            };
            if form.submitting {
                return;
            }
            match form.draft() {
                Ok(draft) => draft,
                Err(err) => {
                    form.validation = Some(err.to_string());
                    return;
                }
            }
        };

        let generation = self.next_generation();
        let Some(form) = self.form.as_mut() else {
            return;
        };
        form.validation = None;
        form.submitting = true;
        form.generation = generation;
        self.spawn_create(generation, draft);
    }

    fn spawn_create(&self, generation: u64, draft: ListingDraft) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.create(&draft).await;
            let _ = tx.send(ApiMsg::Created { generation, result });
        });
    }

    /// Apply a fetch completion, discarding it when stale
    pub fn apply(&mut self, msg: ApiMsg) {
        match msg {
            ApiMsg::Listings { generation, result } => {
                if generation != self.browse.generation {
                    return;
                }
                self.browse.loading = false;
                match result {
                    Ok(listings) => self.browse.set_listings(listings),
                    Err(_) => {
                        self.browse.set_listings(Vec::new());
                        self.browse.error = Some(FETCH_LISTINGS_FAILED.to_string());
                    }
                }
            }
            ApiMsg::Listing { generation, result } => {
                let Some(detail) = self.detail.as_mut() else {
                    return;
                };
                if generation != detail.generation {
                    return;
                }
                match result {
                    Ok(listing) => detail.listing = Some(listing),
                    Err(_) => detail.error = Some(FETCH_LISTING_FAILED.to_string()),
                }
            }
            ApiMsg::Summary { generation, result } => {
                let Some(detail) = self.detail.as_mut() else {
                    return;
                };
                if generation != detail.summary_generation {
                    return;
                }
                detail.summary_inflight = false;
                // A summary failure is deliberately silent: no bullets, no error.
                if let Ok(summary) = result {
                    detail.bullets = Some(summary.bullets);
                }
            }
            ApiMsg::Created { generation, result } => {
                if self.route != Route::Add {
                    return;
                }
                let Some(form) = self.form.as_mut() else {
                    return;
                };
                if generation != form.generation {
                    return;
                }
                form.submitting = false;
                // A failed submit returns to idle without feedback.
                if let Ok(listing) = result {
                    self.open_detail(listing.id);
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.route {
            Route::Browse => self.handle_browse_key(key),
            Route::Detail(id) => self.handle_detail_key(key, id),
            Route::Add => self.handle_add_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        if self.browse.searching {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.browse.searching = false,
                KeyCode::Backspace => {
                    // Only an actual query change issues a new request.
                    if self.browse.query.pop().is_some() {
                        self.spawn_list_fetch();
                    }
                }
                KeyCode::Char(c) => {
                    self.browse.query.push(c);
                    self.spawn_list_fetch();
                }
                KeyCode::Down => self.browse.select_next(),
                KeyCode::Up => self.browse.select_prev(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => self.browse.searching = true,
            KeyCode::Char('a') => self.open_add(),
            KeyCode::Down | KeyCode::Char('j') => self.browse.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.browse.select_prev(),
            KeyCode::Enter => {
                if let Some(listing) = self.browse.selected() {
                    self.open_detail(listing.id);
                }
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent, id: u64) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Backspace => self.open_browse(),
            KeyCode::Char('s') => self.request_summary(id),
            _ => {}
        }
    }

    fn handle_add_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.open_browse(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => {
                if let Some(form) = self.form.as_mut() {
                    form.focus_next();
                }
            }
            KeyCode::BackTab | KeyCode::Up => {
                if let Some(form) = self.form.as_mut() {
                    form.focus_prev();
                }
            }
            KeyCode::Backspace => {
                if let Some(form) = self.form.as_mut() {
                    form.field_mut().pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(form) = self.form.as_mut() {
                    form.field_mut().push(c);
                }
            }
            _ => {}
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        match self.route {
            Route::Browse => browse::render(frame, &mut self.browse),
            Route::Detail(_) => {
                if let Some(screen) = self.detail.as_ref() {
                    detail::render(frame, screen);
                }
            }
            Route::Add => {
                if let Some(screen) = self.form.as_ref() {
                    form::render(frame, screen);
                }
            }
        }
    }
}

/// Launch the TUI against the configured API
pub async fn run(config: &Config) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(client, tx);
    app.open_browse();

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app, &mut rx);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    rx: &mut UnboundedReceiver<ApiMsg>,
) -> Result<()> {
    loop {
        while let Ok(msg) = rx.try_recv() {
            app.apply(msg);
        }

        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Windows compatibility: only handle Press events
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
