/// Phrase that marks a platform error as a rate-limit rejection.
pub const RATE_LIMIT_SIGNATURE: &str = "rate limit";

/// Returns `true` if an error message reports a rate limit.
///
/// The platform exposes no structured signal through the error text alone, so
/// this is a case-insensitive substring match on [`RATE_LIMIT_SIGNATURE`].
/// Messages such as "Too Many Requests" without the phrase are not matched.
pub fn is_rate_limit_message(message: &str) -> bool {
    message.to_lowercase().contains(RATE_LIMIT_SIGNATURE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_regardless_of_case() {
        assert!(is_rate_limit_message("Rate limit exceeded"));
        assert!(is_rate_limit_message("RATE LIMIT"));
        assert!(is_rate_limit_message("429: rate limit reached for resource"));
    }

    #[test]
    fn does_not_match_other_errors() {
        assert!(!is_rate_limit_message("Unauthorized"));
        assert!(!is_rate_limit_message("Too Many Requests"));
        assert!(!is_rate_limit_message("ratelimit"));
        assert!(!is_rate_limit_message(""));
    }
}
