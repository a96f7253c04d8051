//! Member email autocomplete
//!
//! Email fields suggest known users by case-insensitive substring match.

mod email_state;
mod known_users;

pub use email_state::{EMAIL_FIELD_NAME, EmailAutocomplete, attach_email_autocompletes};
pub use known_users::KnownUsers;
