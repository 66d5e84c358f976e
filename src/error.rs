use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmTagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    #[error("{kind} name '{name}' is ambiguous ({count} matches)")]
    Ambiguous {
        kind: &'static str,
        name: String,
        count: usize,
    },

    #[error("Failed to fetch devices for network {network_id}: {source}")]
    FetchError {
        network_id: String,
        #[source]
        source: Box<SmTagError>,
    },

    #[error("Failed to update tags for device {device_id}: {source}")]
    UpdateError {
        device_id: String,
        #[source]
        source: Box<SmTagError>,
    },

    #[error("Dashboard API error: {0}")]
    DashboardApiError(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SmTagError {
    /// Organization or network lookup failed (missing or duplicate name)
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Ambiguous { .. })
    }
}

pub type Result<T> = std::result::Result<T, SmTagError>;

/// Parse a Dashboard API error body into a readable message with a hint
pub fn enhance_dashboard_error(status: u16, error_response: &str) -> String {
    // Dashboard errors look like {"errors": ["..."]}
    let messages = serde_json::from_str::<serde_json::Value>(error_response)
        .ok()
        .and_then(|json| {
            json.get("errors").and_then(|e| e.as_array()).map(|errors| {
                errors
                    .iter()
                    .filter_map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join("; ")
            })
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| error_response.trim().to_string());

    let hint = match status {
        401 => "\nHint: Check that MERAKI_DASHBOARD_API_KEY is a valid, enabled API key.",
        403 => "\nHint: The API key's admin lacks access to this organization or network.",
        404 => "\nHint: The resource doesn't exist or the API key cannot see it.",
        429 => "\nHint: API rate limit exceeded. Wait a moment and try again.",
        _ => "",
    };

    format!("{}{}", messages, hint)
}
