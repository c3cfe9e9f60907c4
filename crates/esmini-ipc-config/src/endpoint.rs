use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use url::Url;

/// TCP endpoint the command server listens on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenEndpoint {
    host: String,
    port: u16,
}

impl ListenEndpoint {
    /// Builds a TCP endpoint from a host name (or address) and port.
    #[must_use]
    pub fn tcp(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Host name or address the listener binds to.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// TCP port the listener binds to. Port `0` requests an ephemeral port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Resolves the endpoint to the first usable socket address.
    pub fn resolve(&self) -> Result<SocketAddr, EndpointResolveError> {
        let mut addrs = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|source| EndpointResolveError::Lookup {
                endpoint: self.to_string(),
                source,
            })?;
        addrs.next().ok_or_else(|| EndpointResolveError::Empty {
            endpoint: self.to_string(),
        })
    }
}

impl fmt::Display for ListenEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(formatter, "tcp://[{}]:{}", self.host, self.port)
        } else {
            write!(formatter, "tcp://{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for ListenEndpoint {
    type Err = EndpointParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let url = Url::parse(input)?;
        if url.scheme() != "tcp" {
            return Err(EndpointParseError::UnsupportedScheme(
                url.scheme().to_owned(),
            ));
        }
        let host = url
            .host_str()
            .ok_or_else(|| EndpointParseError::MissingHost(input.to_owned()))?;
        let port = url
            .port()
            .ok_or_else(|| EndpointParseError::MissingPort(input.to_owned()))?;
        let host = host.trim_start_matches('[').trim_end_matches(']');
        Ok(Self::tcp(host, port))
    }
}

impl Serialize for ListenEndpoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Accepted on-disk and environment representations of an endpoint.
#[derive(Deserialize)]
#[serde(untagged)]
enum EndpointRepr {
    Url(String),
    Table { host: String, port: u16 },
}

impl<'de> Deserialize<'de> for ListenEndpoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match EndpointRepr::deserialize(deserializer)? {
            EndpointRepr::Url(text) => text.parse().map_err(serde::de::Error::custom),
            EndpointRepr::Table { host, port } => Ok(Self::tcp(host, port)),
        }
    }
}

/// Errors encountered while parsing a [`ListenEndpoint`] from text.
#[derive(Debug, Error)]
pub enum EndpointParseError {
    /// Scheme was not `tcp`.
    #[error("unsupported endpoint scheme '{0}', expected 'tcp'")]
    UnsupportedScheme(String),
    /// Host name was missing.
    #[error("missing TCP host in '{0}'")]
    MissingHost(String),
    /// Port was missing.
    #[error("missing TCP port in '{0}'")]
    MissingPort(String),
    /// The value is not a URL at all.
    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),
}

/// Errors raised while resolving an endpoint to a socket address.
#[derive(Debug, Error)]
pub enum EndpointResolveError {
    /// Name resolution failed.
    #[error("failed to resolve {endpoint}: {source}")]
    Lookup {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },
    /// Resolution succeeded but produced no addresses.
    #[error("no addresses resolved for {endpoint}")]
    Empty { endpoint: String },
}
