// src/read/mod.rs
mod encoding;
mod lines;

pub use encoding::{CandidateEncoding, UnknownEncoding};
pub use lines::{data_lines, split_lines};

use serde::Serialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, error, info};

/// Options for [`read_data_lines`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Encodings to try, first match wins.
    pub encodings: Vec<CandidateEncoding>,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            encodings: CandidateEncoding::DEFAULT_ORDER.to_vec(),
        }
    }
}

impl ReaderOptions {
    pub fn with_encodings(encodings: impl IntoIterator<Item = CandidateEncoding>) -> Self {
        Self {
            encodings: encodings.into_iter().collect(),
        }
    }
}

/// The data lines of a file together with the encoding that decoded it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedLines {
    pub encoding: CandidateEncoding,
    pub lines: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("file `{}` not found", .path.display())]
    NotFound { path: PathBuf },

    #[error(
        "unable to read `{}` due to encoding issues (tried {})",
        .path.display(),
        format_tried(.tried)
    )]
    EncodingExhausted {
        path: PathBuf,
        tried: Vec<CandidateEncoding>,
    },

    #[error("failed to read `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReadError {
    /// Missing files and undecodable content fold into an empty result;
    /// anything else is a genuine I/O failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ReadError::NotFound { .. } | ReadError::EncodingExhausted { .. }
        )
    }
}

fn format_tried(tried: &[CandidateEncoding]) -> String {
    if tried.is_empty() {
        return "no encodings".to_string();
    }
    tried
        .iter()
        .map(|e| e.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Decode `path` with the first candidate encoding that accepts its bytes,
/// drop the header line and return the trimmed, non-blank data lines.
///
/// No status is emitted here; see [`read_sales_data`] for the logging
/// entry point.
pub fn read_data_lines<P: AsRef<Path>>(
    path: P,
    options: &ReaderOptions,
) -> Result<DecodedLines, ReadError> {
    let path = path.as_ref();

    // the handle is closed before any decoding starts
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ReadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ReadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    for &encoding in &options.encodings {
        match encoding.decode(&bytes) {
            Some(text) => {
                return Ok(DecodedLines {
                    encoding,
                    lines: data_lines(&text),
                });
            }
            None => debug!(path = %path.display(), %encoding, "rejected by encoding"),
        }
    }

    Err(ReadError::EncodingExhausted {
        path: path.to_path_buf(),
        tried: options.encodings.clone(),
    })
}

/// Read sales data from `path` using the default encoding order.
///
/// Returns the data lines, or an empty vector when the file is missing or no
/// candidate encoding can decode it. Other I/O failures (permissions, a
/// directory instead of a file) are returned as errors.
pub fn read_sales_data<P: AsRef<Path>>(path: P) -> Result<Vec<String>, ReadError> {
    read_sales_data_with(path, &ReaderOptions::default())
}

#[tracing::instrument(level = "debug", skip(path, options), fields(path = %path.as_ref().display()))]
pub fn read_sales_data_with<P: AsRef<Path>>(
    path: P,
    options: &ReaderOptions,
) -> Result<Vec<String>, ReadError> {
    let decoded = report_outcome(read_data_lines(&path, options))?;
    Ok(decoded.map(|d| d.lines).unwrap_or_default())
}

/// Emit the status message for a read. Missing files and exhausted encodings
/// are logged and become `Ok(None)`; other errors pass through untouched.
pub fn report_outcome(
    result: Result<DecodedLines, ReadError>,
) -> Result<Option<DecodedLines>, ReadError> {
    match result {
        Ok(decoded) => {
            info!(
                encoding = %decoded.encoding,
                lines = decoded.lines.len(),
                "file read successfully using {} encoding",
                decoded.encoding
            );
            Ok(Some(decoded))
        }
        Err(err) if err.is_recoverable() => {
            error!("{}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
