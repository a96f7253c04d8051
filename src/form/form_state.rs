use tui_textarea::{CursorMove, TextArea};

use crate::geocode::{Coordinates, CoordinateFields};
use crate::users::EMAIL_FIELD_NAME;

use super::submission::Submission;

pub const NAME_FIELD: &str = "name";
pub const ADDRESS_FIELD: &str = "address";
pub const LONGITUDE_FIELD: &str = "longitude";
pub const LATITUDE_FIELD: &str = "latitude";

/// One named form field
///
/// Hidden fields are never focused or edited by the user; the address
/// autocomplete writes the coordinates into them.
pub struct FormField {
    pub name: String,
    pub label: String,
    pub hidden: bool,
    pub textarea: TextArea<'static>,
}

impl FormField {
    pub fn input(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            hidden: false,
            textarea: TextArea::default(),
        }
    }

    pub fn hidden(name: &str) -> Self {
        Self {
            hidden: true,
            ..Self::input(name, name)
        }
    }

    pub fn value(&self) -> &str {
        self.textarea
            .lines()
            .first()
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Replace the content, leaving the cursor at the end
    pub fn set_value(&mut self, value: &str) {
        let mut textarea = TextArea::new(vec![value.to_string()]);
        textarea.move_cursor(CursorMove::End);
        self.textarea = textarea;
    }
}

pub struct FormState {
    fields: Vec<FormField>,
    focus: usize,
}

impl FormState {
    /// Build a form from its fields; focus starts on the first visible one
    pub fn new(fields: Vec<FormField>) -> Self {
        let focus = fields.iter().position(|f| !f.hidden).unwrap_or(0);
        Self { fields, focus }
    }

    /// The place registration form: name, address with its hidden
    /// coordinates, then `email_fields` member emails
    pub fn place_form(email_fields: usize) -> Self {
        let mut fields = vec![
            FormField::input(NAME_FIELD, "Name"),
            FormField::input(ADDRESS_FIELD, "Address"),
            FormField::hidden(LONGITUDE_FIELD),
            FormField::hidden(LATITUDE_FIELD),
        ];
        for i in 0..email_fields {
            let label = if email_fields == 1 {
                "Member email".to_string()
            } else {
                format!("Member email {}", i + 1)
            };
            fields.push(FormField::input(EMAIL_FIELD_NAME, &label));
        }
        Self::new(fields)
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut FormField> {
        self.fields.get_mut(index)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Index of the first field called `name`
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.index_of(name).map(|i| self.fields[i].value())
    }

    /// Set the first field called `name`; returns false if there is none
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        match self.index_of(name) {
            Some(i) => {
                self.fields[i].set_value(value);
                true
            }
            None => false,
        }
    }

    pub fn focused_index(&self) -> usize {
        self.focus
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focus)
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_previous(&mut self) {
        self.move_focus(self.fields.len().saturating_sub(1));
    }

    /// Step through the fields cyclically, skipping hidden ones
    fn move_focus(&mut self, step: usize) {
        let len = self.fields.len();
        if len == 0 {
            return;
        }
        let mut next = self.focus;
        for _ in 0..len {
            next = (next + step) % len;
            if !self.fields[next].hidden {
                self.focus = next;
                return;
            }
        }
    }

    pub fn submission(&self) -> Submission {
        let coordinate = |name: &str| {
            self.value_of(name)
                .and_then(|v| v.trim().parse::<f64>().ok())
        };

        Submission {
            name: self.value_of(NAME_FIELD).unwrap_or("").trim().to_string(),
            address: self.value_of(ADDRESS_FIELD).unwrap_or("").trim().to_string(),
            longitude: coordinate(LONGITUDE_FIELD),
            latitude: coordinate(LATITUDE_FIELD),
            emails: self
                .fields
                .iter()
                .filter(|f| f.name == EMAIL_FIELD_NAME)
                .map(|f| f.value().trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

impl CoordinateFields for FormState {
    fn set_coordinates(&mut self, coordinates: Coordinates) {
        self.set_value(LONGITUDE_FIELD, &coordinates.longitude.to_string());
        self.set_value(LATITUDE_FIELD, &coordinates.latitude.to_string());
    }
}
