//! Address field autocomplete
//!
//! Owns everything one address field needs: the suggestion popup, the
//! label to coordinates cache, the debouncer, and the current request token.
//! Every new search cancels the previous one and bumps `request_id`, and only
//! a response carrying the current id may touch the cache or the popup.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use tokio_util::sync::CancellationToken;

use super::cache::SuggestionCache;
use super::debouncer::Debouncer;
use super::types::{Coordinates, GeocodeRequest, GeocodeResponse, Place};
use crate::autocomplete::{self, AutocompleteState};
use crate::config::GeocoderConfig;

/// Destination of a selected address's coordinates
pub trait CoordinateFields {
    fn set_coordinates(&mut self, coordinates: Coordinates);
}

pub struct AddressAutocomplete {
    pub popup: AutocompleteState,
    cache: SuggestionCache,
    debouncer: Debouncer,
    min_chars: usize,
    /// Text waiting for the debounce period to expire
    pending_query: Option<String>,
    /// Incremented for every search so stale responses can be dropped
    request_id: u64,
    in_flight_request_id: Option<u64>,
    current_cancel_token: Option<CancellationToken>,
    request_tx: Option<Sender<GeocodeRequest>>,
    response_rx: Option<Receiver<GeocodeResponse>>,
}

impl AddressAutocomplete {
    pub fn new(config: &GeocoderConfig) -> Self {
        Self {
            popup: AutocompleteState::new(),
            cache: SuggestionCache::new(),
            debouncer: Debouncer::new(config.delay_ms),
            min_chars: config.min_chars,
            pending_query: None,
            request_id: 0,
            in_flight_request_id: None,
            current_cancel_token: None,
            request_tx: None,
            response_rx: None,
        }
    }

    /// Set the channel handles for communication with the worker thread
    pub fn set_channels(
        &mut self,
        request_tx: Sender<GeocodeRequest>,
        response_rx: Receiver<GeocodeResponse>,
    ) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    /// React to the field's text changing
    ///
    /// The in-flight search is cancelled right away; the new one is sent once
    /// the debounce period has passed (see [`Self::tick`]). Text below the
    /// minimum length hides the popup and sends nothing.
    pub fn on_input(&mut self, text: &str) {
        self.cancel_in_flight_request();

        if !autocomplete::meets_min_chars(text, self.min_chars) {
            self.pending_query = None;
            self.debouncer.cancel();
            self.popup.hide();
            return;
        }

        self.pending_query = Some(text.to_string());
        self.debouncer.schedule();
    }

    /// Send the pending search if its debounce period has elapsed
    ///
    /// Returns true if a request was sent.
    pub fn tick(&mut self) -> bool {
        if !self.debouncer.is_ready() {
            return false;
        }
        self.debouncer.mark_complete();

        match self.pending_query.take() {
            Some(query) => self.send_request(query),
            None => false,
        }
    }

    /// Cancel any running search and issue a new one for `query`
    ///
    /// Returns true if the request reached the worker.
    pub fn send_request(&mut self, query: String) -> bool {
        if self.request_tx.is_none() {
            return false;
        }

        self.cancel_in_flight_request();

        self.request_id = self.request_id.wrapping_add(1);
        let request_id = self.request_id;
        let cancel_token = CancellationToken::new();

        if let Some(ref tx) = self.request_tx
            && tx
                .send(GeocodeRequest::Search {
                    query,
                    request_id,
                    cancel_token: cancel_token.clone(),
                })
                .is_ok()
        {
            self.current_cancel_token = Some(cancel_token);
            self.in_flight_request_id = Some(request_id);
            return true;
        }

        log::error!("Geocoder worker is not running; request {} dropped", request_id);
        false
    }

    /// Cancel the in-flight search, if any
    ///
    /// Returns true if there was one.
    pub fn cancel_in_flight_request(&mut self) -> bool {
        if let Some(token) = self.current_cancel_token.take() {
            log::debug!(
                "Cancelling in-flight geocoder request {:?}",
                self.in_flight_request_id
            );
            token.cancel();
            self.in_flight_request_id = None;
            return true;
        }
        false
    }

    pub fn has_in_flight_request(&self) -> bool {
        self.in_flight_request_id.is_some()
    }

    pub fn current_request_id(&self) -> u64 {
        self.request_id
    }

    /// Drain the response channel without blocking
    ///
    /// Returns true if any response was received.
    pub fn poll_response_channel(&mut self) -> bool {
        let mut responses = Vec::new();
        let mut disconnected = false;

        if let Some(ref rx) = self.response_rx {
            loop {
                match rx.try_recv() {
                    Ok(response) => responses.push(response),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }

        let had_responses = !responses.is_empty();
        for response in responses {
            self.process_response(response);
        }

        if disconnected {
            log::error!("Geocoder worker disconnected");
            self.response_rx = None;
            self.request_tx = None;
            self.current_cancel_token = None;
            self.in_flight_request_id = None;
        }

        had_responses
    }

    /// Apply one worker response
    ///
    /// Anything not belonging to the request currently in flight is dropped,
    /// which covers superseded and cancelled searches.
    pub fn process_response(&mut self, response: GeocodeResponse) {
        match response {
            GeocodeResponse::Suggestions { places, request_id } => {
                if !self.is_current(request_id) {
                    log::debug!(
                        "Ignoring stale geocoder response {} (current: {})",
                        request_id,
                        self.request_id
                    );
                    return;
                }
                self.finish_request();
                self.apply_places(places);
            }
            GeocodeResponse::Failed {
                message,
                request_id,
            } => {
                log::error!("Geocoder request {} failed: {}", request_id, message);
                if self.is_current(request_id) {
                    self.finish_request();
                    self.popup.hide();
                }
            }
            GeocodeResponse::Cancelled { request_id } => {
                log::debug!("Geocoder request {} cancelled", request_id);
            }
        }
    }

    fn is_current(&self, request_id: u64) -> bool {
        self.in_flight_request_id == Some(request_id)
    }

    fn finish_request(&mut self) {
        self.in_flight_request_id = None;
        self.current_cancel_token = None;
    }

    /// Cache each place's coordinates and show the labels in response order
    fn apply_places(&mut self, places: Vec<Place>) {
        for place in &places {
            self.cache.insert(place);
        }
        self.popup
            .update_suggestions(places.into_iter().map(|p| p.label).collect());
    }

    /// Write the coordinates cached for `label` into `fields`
    ///
    /// An unknown label leaves the fields untouched and returns false.
    pub fn select(&self, label: &str, fields: &mut impl CoordinateFields) -> bool {
        match self.cache.get(label) {
            Some(coordinates) => {
                fields.set_coordinates(coordinates);
                true
            }
            None => {
                log::warn!("Selected address {:?} has no cached coordinates", label);
                false
            }
        }
    }

    /// Accept the highlighted suggestion
    ///
    /// Writes its coordinates into `fields`, closes the popup and returns the
    /// label so the caller can put it in the address field.
    pub fn accept_selected(&mut self, fields: &mut impl CoordinateFields) -> Option<String> {
        let label = self.popup.selected()?.to_string();
        self.select(&label, fields);
        self.popup.hide();
        Some(label)
    }

    pub fn cache(&self) -> &SuggestionCache {
        &self.cache
    }

    pub fn has_pending_search(&self) -> bool {
        self.debouncer.has_pending()
    }
}

#[cfg(test)]
#[path = "address_state_tests.rs"]
mod address_state_tests;
