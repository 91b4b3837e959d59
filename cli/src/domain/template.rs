//! Placeholder substitution for the downloaded collector configuration.
//!
//! Pure functions only: no I/O.

/// Token replaced with the backend endpoint.
pub const ENDPOINT_TOKEN: &str = "PLACEHOLDER_ENDPOINT";
/// Token replaced with the derived instance hostname.
pub const HOSTNAME_TOKEN: &str = "PLACEHOLDER_HOSTNAME";

const TOKENS: [&str; 2] = [ENDPOINT_TOKEN, HOSTNAME_TOKEN];

/// Result of substituting placeholders in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Template text with every placeholder occurrence replaced.
    pub text: String,
    /// Tokens the template did not contain at all.
    pub missing: Vec<&'static str>,
}

/// Replace every occurrence of both placeholder tokens.
#[must_use]
pub fn render(template: &str, endpoint: &str, hostname: &str) -> Rendered {
    let missing = TOKENS
        .iter()
        .copied()
        .filter(|t| !template.contains(t))
        .collect();
    let text = template
        .replace(ENDPOINT_TOKEN, endpoint)
        .replace(HOSTNAME_TOKEN, hostname);
    Rendered { text, missing }
}

/// Placeholder tokens still present in `text`.
#[must_use]
pub fn unresolved(text: &str) -> Vec<&'static str> {
    TOKENS.iter().copied().filter(|t| text.contains(t)).collect()
}
