//! Plain-language hints printed below a failed command's error chain.

use crm_lookup::LookupError;

/// Returns a hint for the first [`LookupError`] in `error`'s chain.
///
/// Retryable failures (network errors, rate limiting, server errors) get a
/// suggestion to run the command again.
pub fn error_hint(error: &anyhow::Error) -> Option<String> {
    let lookup = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<LookupError>())?;

    let mut hint = lookup.user_message().to_string();
    if lookup.is_retryable() {
        hint.push_str(" Try again in a moment.");
    }
    Some(hint)
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use super::*;

    #[test]
    fn test_network_error_suggests_retry() {
        let error = Err::<(), _>(LookupError::Network("connection refused".to_string()))
            .context("Search failed")
            .unwrap_err();

        assert_eq!(
            error_hint(&error).as_deref(),
            Some("Could not reach the server. Please check your connection. Try again in a moment.")
        );
    }

    #[test]
    fn test_not_found_has_no_retry_suggestion() {
        let error = anyhow::Error::new(LookupError::NotFound("7".to_string()));

        assert_eq!(
            error_hint(&error).as_deref(),
            Some("The selected record no longer exists.")
        );
    }

    #[test]
    fn test_server_error_suggests_retry() {
        let error = anyhow::Error::new(LookupError::Status {
            status: 503,
            body: String::new(),
        });

        let hint = error_hint(&error).unwrap();
        assert!(hint.ends_with("Try again in a moment."));
    }

    #[test]
    fn test_other_errors_have_no_hint() {
        let error = anyhow::anyhow!("Failed to read stdin");
        assert_eq!(error_hint(&error), None);
    }
}
