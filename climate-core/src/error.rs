use thiserror::Error;

/// Per-year failures. None of these stop a run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode JSON response. Received text: {snippet}...")]
    Decode {
        snippet: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Problems reading a saved season payload.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("payload has no `properties.parameter.{0}` series")]
    MissingSeries(&'static str),
}

impl FetchError {
    pub fn status(status: u16, body: &str) -> Self {
        FetchError::Status { status, body: truncate_body(body, STATUS_BODY_MAX) }
    }

    pub fn decode(body: &str, source: serde_json::Error) -> Self {
        FetchError::Decode { snippet: truncate_body(body, DECODE_SNIPPET_MAX), source }
    }
}

const STATUS_BODY_MAX: usize = 200;
const DECODE_SNIPPET_MAX: usize = 100;

/// First `max` characters of `body`, never splitting a UTF-8 sequence.
pub(crate) fn truncate_body(body: &str, max: usize) -> String {
    match body.char_indices().nth(max) {
        Some((idx, _)) => body[..idx].to_string(),
        None => body.to_string(),
    }
}
