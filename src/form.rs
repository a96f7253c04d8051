//! Place registration form model

mod form_state;
mod submission;

pub use form_state::{
    ADDRESS_FIELD, FormField, FormState, LATITUDE_FIELD, LONGITUDE_FIELD, NAME_FIELD,
};
pub use submission::Submission;
