//! Client construction errors.

/// Failure to construct an `OmdbClient` from its configuration.
///
/// Raised by `OmdbClientBuilder::build` before any request is possible.
#[derive(Debug)]
pub enum ConfigError {
    /// No API key was supplied (unset or blank).
    MissingApiKey,
    /// No User-Agent was supplied.
    MissingUserAgent,
    /// The base URL could not be parsed.
    InvalidBaseUrl(String),
    /// The underlying HTTP client could not be built.
    HttpClient(reqwest::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "OMDb API key is not configured"),
            Self::MissingUserAgent => write!(f, "user_agent is required"),
            Self::InvalidBaseUrl(url) => write!(f, "invalid OMDb base URL: {url}"),
            Self::HttpClient(_) => write!(f, "failed to build HTTP client"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClient(err) => Some(err),
            _ => None,
        }
    }
}
