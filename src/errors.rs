use core::fmt;
use std::{io, path::PathBuf};

use reqwest::header::{InvalidHeaderName, InvalidHeaderValue};
use url::Url;

/// Result alias used throughout this crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Where the input of a failed parse came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// An in-memory byte buffer
    Buffer,
    /// A caller-provided reader
    Reader,
    /// A local file
    File(PathBuf),
    /// The body of an HTTP response
    ResponseBody(Url),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Origin::Buffer => f.write_str("buffer"),
            Origin::Reader => f.write_str("reader"),
            Origin::File(path) => write!(f, "file {}", path.display()),
            Origin::ResponseBody(url) => write!(f, "response body of {}", url),
        }
    }
}

/// The underlying cause of a [`Error::Parse`]
#[derive(Debug, thiserror::Error)]
pub enum ParseFailure {
    /// Reading the input failed before it reached the parser
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Reading the HTTP response body failed
    #[error(transparent)]
    Body(#[from] reqwest::Error),
    /// The HTML parser rejected the input
    #[error(transparent)]
    Parser(#[from] tl::errors::ParseError),
}

/// An error that occurred while loading a document
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input could not be read or parsed as HTML
    #[error("failed to parse {origin}")]
    Parse {
        /// Where the input came from
        origin: Origin,
        /// The underlying cause
        #[source]
        source: ParseFailure,
    },
    /// A local file could not be opened
    #[error("failed to open file {}", path.display())]
    Open {
        /// The path that was opened
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    /// The outgoing request could not be constructed
    #[error("failed to build request for {url}")]
    RequestBuild {
        /// The requested URL
        url: Url,
        /// The underlying cause
        #[source]
        source: reqwest::Error,
    },
    /// A request configuration tried to set a header with an invalid name
    #[error("invalid header name `{name}`")]
    InvalidHeaderName {
        /// The rejected header name
        name: String,
        /// The underlying cause
        #[source]
        source: InvalidHeaderName,
    },
    /// A request configuration tried to set a header with an invalid value
    #[error("invalid value for header `{name}`")]
    InvalidHeaderValue {
        /// The header whose value was rejected
        name: String,
        /// The underlying cause
        #[source]
        source: InvalidHeaderValue,
    },
    /// The request was sent but no response was retrieved
    #[error("failed to retrieve response from {url}")]
    Transport {
        /// The requested URL
        url: Url,
        /// The underlying cause
        #[source]
        source: reqwest::Error,
    },
}

impl Error {
    pub(crate) fn parse(origin: Origin, source: impl Into<ParseFailure>) -> Self {
        Error::Parse {
            origin,
            source: source.into(),
        }
    }

    /// Returns whether reading or parsing the HTML input failed
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    /// Returns whether a local file could not be opened
    pub fn is_open(&self) -> bool {
        matches!(self, Error::Open { .. })
    }

    /// Returns whether building or sending an HTTP request failed
    pub fn is_request(&self) -> bool {
        matches!(
            self,
            Error::Client(_)
                | Error::RequestBuild { .. }
                | Error::InvalidHeaderName { .. }
                | Error::InvalidHeaderValue { .. }
                | Error::Transport { .. }
        )
    }
}
