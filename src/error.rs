/// Error taxonomy for the report pipeline
///
/// Two families, matching the two things that can go wrong:
/// - [`FetchError`] - retrieving a report payload (network, HTTP status,
///   decoding, or reading a local payload file)
/// - [`ExportError`] - turning a loaded report into artifacts (capture,
///   pagination, PDF/PNG/JSON assembly, filesystem writes)
///
/// Configuration and argument problems stay plain `String`s at the CLI
/// boundary; only the pipeline proper carries typed errors.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while retrieving a report payload.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint answered with a non-success HTTP status.
    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    /// The request never produced a response (DNS, connect, timeout, TLS).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },

    /// The response body could not be read or did not match the expected
    /// JSON shape.
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// A local payload file could not be read.
    #[error("could not read payload file {}: {source}", path.display())]
    PayloadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A local payload file did not contain a valid report payload.
    #[error("could not parse payload file {}: {source}", path.display())]
    PayloadParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure while exporting a loaded report.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The captured region had a zero dimension, so there is nothing to
    /// place on a page.
    #[error("report region is empty ({width}x{height} px)")]
    EmptyRegion { width: u32, height: u32 },

    /// The generated report markup was rejected by the SVG parser.
    #[error("could not parse report markup: {0}")]
    Svg(#[from] resvg::usvg::Error),

    /// The raster surface for the capture could not be allocated.
    #[error("could not allocate a {width}x{height} px capture surface")]
    Surface { width: u32, height: u32 },

    /// The captured bitmap could not be encoded as PNG.
    #[error("could not encode captured bitmap: {0}")]
    Png(String),

    /// The PDF document could not be assembled or serialized.
    #[error("could not assemble PDF document: {0}")]
    Pdf(String),

    /// The report JSON artifact could not be encoded.
    #[error("could not encode report JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An artifact file could not be written.
    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Wrap an io error from writing `path`.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Write { path: path.into(), source }
    }
}
