use std::sync::Arc;

use super::known_users::KnownUsers;
use crate::autocomplete::{self, AutocompleteState};

/// Field name that receives user suggestions, as in `input[name="email"]`
pub const EMAIL_FIELD_NAME: &str = "email";

/// Email suggestions for one form field
#[derive(Debug)]
pub struct EmailAutocomplete {
    field_index: usize,
    users: Arc<KnownUsers>,
    min_chars: usize,
    pub popup: AutocompleteState,
}

impl EmailAutocomplete {
    pub fn new(field_index: usize, users: Arc<KnownUsers>, min_chars: usize) -> Self {
        Self {
            field_index,
            users,
            min_chars,
            popup: AutocompleteState::new(),
        }
    }

    /// Index of the form field this filter is attached to
    pub fn field_index(&self) -> usize {
        self.field_index
    }

    /// Refresh suggestions for the field's current text
    pub fn on_input(&mut self, text: &str) {
        if !autocomplete::meets_min_chars(text, self.min_chars) {
            self.popup.hide();
            return;
        }
        self.popup.update_suggestions(self.users.filter(text));
    }

    /// Take the highlighted suggestion and close the popup
    pub fn accept_selected(&mut self) -> Option<String> {
        let choice = self.popup.selected()?.to_string();
        self.popup.hide();
        Some(choice)
    }
}

/// Attach one filter to every field named `email`
///
/// All filters share the same parsed user list.
pub fn attach_email_autocompletes<'a>(
    field_names: impl IntoIterator<Item = &'a str>,
    users: Arc<KnownUsers>,
    min_chars: usize,
) -> Vec<EmailAutocomplete> {
    field_names
        .into_iter()
        .enumerate()
        .filter(|(_, name)| *name == EMAIL_FIELD_NAME)
        .map(|(index, _)| EmailAutocomplete::new(index, Arc::clone(&users), min_chars))
        .collect()
}
