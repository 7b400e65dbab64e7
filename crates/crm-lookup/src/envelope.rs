//! Response envelope parsing.
//!
//! Every endpoint answers with `{ "success": bool, "data": { "data": T } }`.
//! A `success: false` flag, a missing `data` object, or a missing inner
//! `data` field are all reported as errors so callers can treat them the same
//! way as a network failure.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::candidate::Candidate;
use crate::error::{LookupError, Result};

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<Payload<T>>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Payload<T> {
    data: Option<T>,
}

/// Parses a lookup-by-text response body.
pub fn parse_list(bytes: &[u8]) -> Result<Vec<Candidate>> {
    unwrap_envelope(bytes)
}

/// Parses a lookup-by-id response body.
pub fn parse_record(bytes: &[u8]) -> Result<Candidate> {
    unwrap_envelope(bytes)
}

fn unwrap_envelope<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let envelope: Envelope<T> = serde_json::from_slice(bytes)?;

    if !envelope.success {
        return Err(LookupError::Rejected(
            envelope
                .message
                .unwrap_or_else(|| "success flag was false".to_string()),
        ));
    }

    envelope
        .data
        .ok_or_else(|| LookupError::MalformedResponse("missing `data` object".to_string()))?
        .data
        .ok_or_else(|| LookupError::MalformedResponse("missing `data.data` payload".to_string()))
}
