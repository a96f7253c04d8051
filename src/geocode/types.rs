//! Geocoder wire types and the worker channel protocol

use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// A longitude/latitude pair as returned by the geocoder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

/// One suggestion: a human-readable label and where it is
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub label: String,
    pub coordinates: Coordinates,
}

/// Top-level geocoder response body
///
/// Only the fields the adapter reads are modelled; anything else in the
/// GeoJSON document is ignored.
#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Option<Vec<Feature>>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    pub properties: FeatureProperties,
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct FeatureProperties {
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

impl FeatureCollection {
    /// Flatten the collection into places, keeping response order.
    ///
    /// A missing or null `features` member means "no results".
    pub fn into_places(self) -> Vec<Place> {
        self.features
            .unwrap_or_default()
            .into_iter()
            .map(|feature| {
                let [longitude, latitude] = feature.geometry.coordinates;
                Place {
                    label: feature.properties.label,
                    coordinates: Coordinates {
                        longitude,
                        latitude,
                    },
                }
            })
            .collect()
    }
}

/// Request messages sent to the geocoder worker thread
#[derive(Debug)]
pub enum GeocodeRequest {
    Search {
        query: String,
        /// Unique ID for this request, used to filter stale responses
        request_id: u64,
        cancel_token: CancellationToken,
    },
}

/// Response messages received from the geocoder worker thread
#[derive(Debug)]
pub enum GeocodeResponse {
    /// The search completed; `places` may be empty
    Suggestions { places: Vec<Place>, request_id: u64 },
    /// The search failed for a reason other than cancellation
    Failed { message: String, request_id: u64 },
    /// The search was superseded and aborted
    Cancelled { request_id: u64 },
}
