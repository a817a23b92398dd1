use std::convert::TryFrom;
use std::fmt;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Base URL cannot be empty")]
    EmptyUrl,
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),
    #[error("URL must have a host")]
    MissingHost,
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
    #[error("Endpoint path must start with '/' and contain no whitespace: {0:?}")]
    InvalidEndpointPath(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scheme {
    Http,
    Https,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Http => write!(f, "http"),
            Scheme::Https => write!(f, "https"),
        }
    }
}

/// Root address of the backend under test.
/// Guarantees: HTTP/HTTPS scheme, non-empty host, no trailing slash on the prefix
#[derive(Debug, Clone, PartialEq)]
pub struct BaseUrl {
    pub scheme: Scheme,

    /// lowercased, may be a local address
    pub host: String,

    /// only non-default ports
    pub port: Option<u16>,

    /// path prefix the endpoints are mounted under, empty for the root
    pub prefix: String,
}

impl BaseUrl {
    pub fn parse(url_str: &str) -> Result<Self, ValidationError> {
        let trimmed = url_str.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyUrl);
        }

        let url =
            Url::parse(trimmed).map_err(|_| ValidationError::MalformedUrl(trimmed.to_string()))?;
        BaseUrl::try_from(url)
    }

    /// Full URL for an endpoint path such as `/frontrowmd/products`.
    pub fn join(&self, path: &str) -> String {
        format!("{self}/{}", path.trim_start_matches('/'))
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;

        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }

        write!(f, "{}", self.prefix)
    }
}

impl TryFrom<Url> for BaseUrl {
    type Error = ValidationError;

    fn try_from(url: Url) -> Result<Self, Self::Error> {
        let scheme = match url.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            scheme => return Err(ValidationError::UnsupportedScheme(scheme.to_string())),
        };

        let host = url.host_str().ok_or(ValidationError::MissingHost)?;
        if host.is_empty() {
            return Err(ValidationError::MissingHost);
        }
        let host = host.to_lowercase();

        // Url::port() already drops the scheme default
        let port = url.port();

        let prefix = url.path().trim_end_matches('/').to_string();

        Ok(BaseUrl {
            scheme,
            host,
            port,
            prefix,
        })
    }
}

pub fn validate_endpoint_path(path: &str) -> Result<(), ValidationError> {
    if !path.starts_with('/') || path.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEndpointPath(path.to_string()));
    }
    Ok(())
}
