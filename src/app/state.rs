use std::sync::Arc;

use crate::autocomplete::AutocompleteState;
use crate::config::Config;
use crate::form::{ADDRESS_FIELD, FormState, Submission};
use crate::geocode::AddressAutocomplete;
use crate::users::{EmailAutocomplete, KnownUsers, attach_email_autocompletes};

pub struct App {
    pub form: FormState,
    pub address: AddressAutocomplete,
    pub emails: Vec<EmailAutocomplete>,
    /// Warning shown in the status line instead of the key help
    pub status: Option<String>,
    pub should_quit: bool,
    pub submitted: bool,
    dirty: bool,
}

impl App {
    pub fn new(config: &Config, users: Arc<KnownUsers>, email_fields: usize) -> Self {
        let form = FormState::place_form(email_fields);
        let emails = attach_email_autocompletes(form.field_names(), users, config.email.min_chars);

        Self {
            form,
            address: AddressAutocomplete::new(&config.geocoder),
            emails,
            status: None,
            should_quit: false,
            submitted: false,
            dirty: true,
        }
    }

    /// Fill the first field called `name` and run its autocomplete
    pub fn prefill(&mut self, name: &str, value: &str) {
        if let Some(index) = self.form.index_of(name) {
            if let Some(field) = self.form.field_mut(index) {
                field.set_value(value);
            }
            self.on_field_changed(index);
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The submitted values, if the user submitted the form
    pub fn submission(&self) -> Option<Submission> {
        self.submitted.then(|| self.form.submission())
    }

    pub fn should_render(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Send due searches and apply geocoder responses
    pub fn poll_background(&mut self) {
        self.address.tick();
        if self.address.poll_response_channel() {
            self.mark_dirty();
        }
    }

    fn is_address_field(&self, index: usize) -> bool {
        self.form.index_of(ADDRESS_FIELD) == Some(index)
    }

    fn email_for_field(&mut self, index: usize) -> Option<&mut EmailAutocomplete> {
        self.emails.iter_mut().find(|e| e.field_index() == index)
    }

    /// Popup belonging to the focused field
    pub fn active_popup(&self) -> Option<&AutocompleteState> {
        let focus = self.form.focused_index();
        if self.is_address_field(focus) {
            return Some(&self.address.popup);
        }
        self.emails
            .iter()
            .find(|e| e.field_index() == focus)
            .map(|e| &e.popup)
    }

    pub fn active_popup_mut(&mut self) -> Option<&mut AutocompleteState> {
        let focus = self.form.focused_index();
        if self.is_address_field(focus) {
            return Some(&mut self.address.popup);
        }
        self.email_for_field(focus).map(|e| &mut e.popup)
    }

    pub fn popup_visible(&self) -> bool {
        self.active_popup().is_some_and(|p| p.is_visible())
    }

    /// Route a text change to the autocomplete attached to field `index`
    pub fn on_field_changed(&mut self, index: usize) {
        let Some(text) = self.form.field(index).map(|f| f.value().to_string()) else {
            return;
        };

        if self.is_address_field(index) {
            self.address.on_input(&text);
        } else if let Some(email) = self.email_for_field(index) {
            email.on_input(&text);
        }
    }

    /// Put the highlighted suggestion into the focused field
    ///
    /// For the address this also fills the hidden coordinates. Returns true
    /// if a suggestion was accepted.
    pub fn accept_suggestion(&mut self) -> bool {
        let focus = self.form.focused_index();

        let accepted = if self.is_address_field(focus) {
            self.address.accept_selected(&mut self.form)
        } else {
            self.email_for_field(focus).and_then(|e| e.accept_selected())
        };

        match accepted {
            Some(value) => {
                if let Some(field) = self.form.field_mut(focus) {
                    field.set_value(&value);
                }
                true
            }
            None => false,
        }
    }

    pub fn hide_popup(&mut self) {
        if let Some(popup) = self.active_popup_mut() {
            popup.hide();
        }
    }
}
