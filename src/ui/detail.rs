//! Detail screen: one listing, with an on-demand generated summary.

use crate::listing::{format_price, Listing};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Stylize;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

/// Error copy for a failed primary fetch
pub const FETCH_LISTING_FAILED: &str = "Failed to fetch listing";

#[derive(Debug)]
pub struct DetailScreen {
    pub id: u64,
    pub listing: Option<Listing>,
    /// Summary bullets, present once a summary request succeeded
    pub bullets: Option<Vec<String>>,
    pub error: Option<String>,
    pub summary_inflight: bool,
    pub(super) generation: u64,
    pub(super) summary_generation: u64,
}

impl DetailScreen {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            listing: None,
            bullets: None,
            error: None,
            summary_inflight: false,
            generation: 0,
            summary_generation: 0,
        }
    }
}

pub(super) fn render(frame: &mut Frame, screen: &DetailScreen) {
    let [main_area, help_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    let block = Block::bordered().title(format!(" Listing #{} ", screen.id));

    // A failed primary fetch replaces the whole view.
    if let Some(error) = &screen.error {
        let message = Paragraph::new(error.as_str().red())
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(message, main_area);
        let help = Line::from("esc back  q quit").dim();
        frame.render_widget(help, help_area);
        return;
    }

    let Some(listing) = &screen.listing else {
        frame.render_widget(Paragraph::new("Loading...".dim()).block(block), main_area);
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw(listing.title.as_str()).bold(),
            Span::raw("  "),
            Span::raw(format_price(listing.price)).green().bold(),
        ]),
        Line::default(),
    ];

    if let Some(url) = &listing.image_url {
        lines.push(Line::from(vec![
            Span::raw("Image: ").dim(),
            Span::raw(url.as_str()),
        ]));
        lines.push(Line::default());
    }

    lines.push(Line::from("Location").underlined());
    lines.push(Line::from(listing.location.as_str()));
    lines.push(Line::default());
    lines.push(Line::from("Description").underlined());
    lines.push(Line::from(listing.description.as_str()));
    lines.push(Line::default());

    match &screen.bullets {
        Some(bullets) => {
            lines.push(Line::from("Summary").underlined());
            for bullet in bullets {
                lines.push(Line::from(bullet.as_str()));
            }
        }
        None if screen.summary_inflight => {
            lines.push(Line::from("Summarizing...").dim());
        }
        None => {
            lines.push(Line::from("Press 's' for a generated summary.").dim());
        }
    }

    let body = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(body, main_area);

    let help = Line::from("s summary  esc back  q quit").dim();
    frame.render_widget(help, help_area);
}
