//! Browse screen: the query-driven listing collection.

use crate::listing::{format_price, Listing};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

/// Error copy for a failed collection fetch
pub const FETCH_LISTINGS_FAILED: &str = "Failed to fetch listings";

/// State for the browse screen.
///
/// `generation` tags the most recently issued collection fetch; completion
/// messages carrying any other generation are stale and must be discarded.
#[derive(Debug, Default)]
pub struct BrowseScreen {
    pub query: String,
    pub listings: Vec<Listing>,
    pub list_state: ListState,
    pub loading: bool,
    pub error: Option<String>,
    /// Whether keystrokes currently edit the search query
    pub searching: bool,
    pub(super) generation: u64,
}

impl BrowseScreen {
    /// Replace the collection with a fresh server response
    pub fn set_listings(&mut self, listings: Vec<Listing>) {
        self.listings = listings;
        self.error = None;
        if self.listings.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }

    pub fn selected(&self) -> Option<&Listing> {
        self.list_state.selected().and_then(|i| self.listings.get(i))
    }

    pub fn select_next(&mut self) {
        let len = self.listings.len();
        if len > 0 {
            let i = self.list_state.selected().unwrap_or(0);
            self.list_state.select(Some((i + 1) % len));
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.listings.len();
        if len > 0 {
            let i = self.list_state.selected().unwrap_or(0);
            self.list_state.select(Some((i + len - 1) % len));
        }
    }
}

/// Copy for a completed, non-erroring, empty collection fetch
pub fn no_results_message(query: &str) -> String {
    if query.is_empty() {
        "No listings yet. Press 'a' to add one.".to_string()
    } else {
        format!("No listings match \"{}\".", query)
    }
}

pub(super) fn render(frame: &mut Frame, screen: &mut BrowseScreen) {
    let [search_area, main_area, help_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let search_style = if screen.searching {
        Style::new().cyan()
    } else {
        Style::default()
    };
    let search = Paragraph::new(screen.query.as_str()).block(
        Block::bordered()
            .title(" Search (/) ")
            .border_style(search_style),
    );
    frame.render_widget(search, search_area);

    let title = if screen.loading {
        " Properties (loading...) ".to_string()
    } else {
        format!(" Properties ({}) ", screen.listings.len())
    };
    let block = Block::bordered().title(title);

    if let Some(error) = &screen.error {
        let message = Paragraph::new(error.as_str().red())
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(message, main_area);
    } else if screen.listings.is_empty() && !screen.loading {
        let message = Paragraph::new(no_results_message(&screen.query).dim())
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(message, main_area);
    } else {
        let items: Vec<ListItem> = screen
            .listings
            .iter()
            .map(|listing| {
                ListItem::new(Line::from(vec![
                    Span::raw(listing.title.as_str()).bold(),
                    Span::raw("  "),
                    Span::raw(format_price(listing.price)).green(),
                    Span::raw("  "),
                    Span::raw(listing.location.as_str()).dim(),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::new().reversed())
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, main_area, &mut screen.list_state);
    }

    let help = Line::from("/ search  up/down select  enter open  a add  q quit").dim();
    frame.render_widget(help, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: u64) -> Listing {
        Listing {
            id,
            title: format!("Listing {}", id),
            price: 100.0,
            location: "Loc".to_string(),
            description: "D".to_string(),
            image_url: None,
        }
    }

    #[test]
    fn no_results_copy_differs_with_and_without_a_query() {
        assert_eq!(no_results_message(""), "No listings yet. Press 'a' to add one.");
        assert_eq!(no_results_message("loft"), "No listings match \"loft\".");
    }

    #[test]
    fn selection_wraps_around_the_collection() {
        let mut screen = BrowseScreen::default();
        screen.set_listings(vec![listing(1), listing(2), listing(3)]);
        assert_eq!(screen.selected().unwrap().id, 1);

        screen.select_prev();
        assert_eq!(screen.selected().unwrap().id, 3);
        screen.select_next();
        assert_eq!(screen.selected().unwrap().id, 1);
        screen.select_next();
        assert_eq!(screen.selected().unwrap().id, 2);
    }

    #[test]
    fn empty_collection_clears_the_selection() {
        let mut screen = BrowseScreen::default();
        screen.set_listings(vec![listing(1)]);
        screen.set_listings(Vec::new());
        assert!(screen.selected().is_none());
    }
}
