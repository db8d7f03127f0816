//! Add screen: the listing creation form.

use crate::listing::{DraftError, ListingDraft};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Price,
    Location,
    Description,
    ImageUrl,
}

impl FormField {
    const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::Price,
        FormField::Location,
        FormField::Description,
        FormField::ImageUrl,
    ];

    fn label(self) -> &'static str {
        match self {
            FormField::Title => " Title ",
            FormField::Price => " Price ",
            FormField::Location => " Location ",
            FormField::Description => " Description ",
            FormField::ImageUrl => " Image URL (optional) ",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// State for the creation form.
///
/// The submit action is disabled while a create request is in flight; a
/// failed request returns the form to idle without feedback.
#[derive(Debug)]
pub struct AddScreen {
    pub title: String,
    pub price: String,
    pub location: String,
    pub description: String,
    pub image_url: String,
    pub focus: FormField,
    pub submitting: bool,
    /// Inline validation message; cleared on a successful submit
    pub validation: Option<String>,
    pub(super) generation: u64,
}

impl Default for AddScreen {
    fn default() -> Self {
        Self {
            title: String::new(),
            price: String::new(),
            location: String::new(),
            description: String::new(),
            image_url: String::new(),
            focus: FormField::Title,
            submitting: false,
            validation: None,
            generation: 0,
        }
    }
}

impl AddScreen {
    pub fn field_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Price => &mut self.price,
            FormField::Location => &mut self.location,
            FormField::Description => &mut self.description,
            FormField::ImageUrl => &mut self.image_url,
        }
    }

    fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Price => &self.price,
            FormField::Location => &self.location,
            FormField::Description => &self.description,
            FormField::ImageUrl => &self.image_url,
        }
    }

    pub fn focus_next(&mut self) {
        let next = (self.focus.index() + 1) % FormField::ALL.len();
        self.focus = FormField::ALL[next];
    }

    pub fn focus_prev(&mut self) {
        let len = FormField::ALL.len();
        let prev = (self.focus.index() + len - 1) % len;
        self.focus = FormField::ALL[prev];
    }

    /// Validate the form into a transmittable draft
    pub fn draft(&self) -> Result<ListingDraft, DraftError> {
        ListingDraft::from_input(
            &self.title,
            &self.price,
            &self.location,
            &self.description,
            &self.image_url,
        )
    }
}

pub(super) fn render(frame: &mut Frame, screen: &AddScreen) {
    let [title_area, price_area, location_area, description_area, image_area, status_area, help_area] =
        Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    let areas = [
        (FormField::Title, title_area),
        (FormField::Price, price_area),
        (FormField::Location, location_area),
        (FormField::Description, description_area),
        (FormField::ImageUrl, image_area),
    ];

    for (field, area) in areas {
        let style = if screen.focus == field && !screen.submitting {
            Style::new().cyan()
        } else {
            Style::default()
        };
        let input = Paragraph::new(screen.field(field)).block(
            Block::bordered()
                .title(field.label())
                .border_style(style),
        );
        frame.render_widget(input, area);
    }

    if screen.submitting {
        frame.render_widget(Paragraph::new("Submitting...".dim()), status_area);
    } else if let Some(validation) = &screen.validation {
        frame.render_widget(Paragraph::new(validation.as_str().red()), status_area);
    }

    let help = Line::from("tab/down next  shift-tab/up prev  enter submit  esc cancel").dim();
    frame.render_widget(help, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_through_all_fields() {
        let mut screen = AddScreen::default();
        assert_eq!(screen.focus, FormField::Title);

        for expected in [
            FormField::Price,
            FormField::Location,
            FormField::Description,
            FormField::ImageUrl,
            FormField::Title,
        ] {
            screen.focus_next();
            assert_eq!(screen.focus, expected);
        }

        screen.focus_prev();
        assert_eq!(screen.focus, FormField::ImageUrl);
    }

    #[test]
    fn draft_reflects_the_focused_field_edits() {
        let mut screen = AddScreen::default();
        screen.field_mut().push_str("My Listing");
        screen.focus_next();
        screen.field_mut().push_str("1234");
        screen.focus_next();
        screen.field_mut().push_str("City");
        screen.focus_next();
        screen.field_mut().push_str("Nice place");

        let draft = screen.draft().unwrap();
        assert_eq!(draft.title, "My Listing");
        assert_eq!(draft.price, 1234.0);
        assert_eq!(draft.image_url, None);
    }

    #[test]
    fn invalid_price_fails_validation() {
        let mut screen = AddScreen::default();
        screen.title = "T".to_string();
        screen.price = "a lot".to_string();
        screen.location = "L".to_string();
        screen.description = "D".to_string();

        assert!(screen.draft().is_err());
    }
}
