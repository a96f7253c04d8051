//! Address geocoding autocomplete
//!
//! The address field asks a geocoder for matching addresses while the user
//! types; picking one copies its coordinates into the hidden fields.

mod address_state;
mod cache;
mod client;
mod debouncer;
mod types;
pub mod worker;

pub use address_state::{AddressAutocomplete, CoordinateFields};
pub use cache::SuggestionCache;
pub use client::{GeocodeClient, GeocodeError};
pub use types::{Coordinates, GeocodeRequest, GeocodeResponse, Place};
