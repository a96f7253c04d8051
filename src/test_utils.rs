//! Shared test utilities for placeform
//!
//! Common fixtures and helpers used across test modules.

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Arc;
    use std::sync::mpsc::{self, Receiver, Sender};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::app::App;
    use crate::config::{Config, GeocoderConfig};
    use crate::geocode::{GeocodeRequest, GeocodeResponse};
    use crate::users::KnownUsers;

    pub const TEST_USERS: [&str; 3] = ["alice@x.com", "bob@x.com", "al@y.com"];

    /// Config with no debounce delay so searches go out on the next poll
    pub fn test_config() -> Config {
        Config {
            geocoder: GeocoderConfig {
                delay_ms: 0,
                ..GeocoderConfig::default()
            },
            ..Config::default()
        }
    }

    pub fn test_users() -> Arc<KnownUsers> {
        Arc::new(KnownUsers::new(
            TEST_USERS.iter().map(|s| s.to_string()).collect(),
        ))
    }

    /// App with one email field and no geocoder worker
    pub fn test_app() -> App {
        App::new(&test_config(), test_users(), 1)
    }

    /// App whose geocoder channels are driven by the test
    pub fn connected_app() -> (App, Receiver<GeocodeRequest>, Sender<GeocodeResponse>) {
        let (request_tx, request_rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();
        let mut app = test_app();
        app.address.set_channels(request_tx, response_rx);
        (app, request_rx, response_tx)
    }

    /// Helper to create a KeyEvent without modifiers
    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    /// Helper to create a KeyEvent with specific modifiers
    pub fn key_with_mods(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    pub fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
    }
}
