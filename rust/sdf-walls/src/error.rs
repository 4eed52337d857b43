// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for wall extraction and scene generation
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting an image into walls
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot decode image: {0}")]
    Decode(String),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Invalid decomposition: {0}")]
    InvalidDecomposition(String),

    #[error("XML writer error: {0}")]
    Xml(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => Error::Io(io),
            other => Error::Decode(other.to_string()),
        }
    }
}
