// Configuration type definitions

use serde::Deserialize;

pub const DEFAULT_GEOCODER_ENDPOINT: &str = "https://api-adresse.data.gouv.fr/search/";

/// Geocoder configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Maximum number of features requested per search
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Results are biased towards this point (Lyon by default)
    #[serde(default = "default_bias_latitude")]
    pub bias_latitude: f64,
    #[serde(default = "default_bias_longitude")]
    pub bias_longitude: f64,
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_endpoint() -> String {
    DEFAULT_GEOCODER_ENDPOINT.to_string()
}

fn default_limit() -> u32 {
    15
}

fn default_bias_latitude() -> f64 {
    45.76
}

fn default_bias_longitude() -> f64 {
    4.84
}

fn default_min_chars() -> usize {
    3
}

fn default_delay_ms() -> u64 {
    30
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        GeocoderConfig {
            endpoint: default_endpoint(),
            limit: default_limit(),
            bias_latitude: default_bias_latitude(),
            bias_longitude: default_bias_longitude(),
            min_chars: default_min_chars(),
            delay_ms: default_delay_ms(),
        }
    }
}

/// Email autocomplete configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

impl Default for EmailConfig {
    fn default() -> Self {
        EmailConfig {
            min_chars: default_min_chars(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    #[serde(default)]
    pub email: EmailConfig,
}
