//! Browser Media
//!
//! Futures over the camera, canvas and file-reading APIs. Each callback or
//! promise based browser call is wrapped so callers see a single `await`
//! yielding `Result<T, MediaError>`.

pub mod camera;
pub mod file;

pub use camera::{open_rear_camera, snapshot_jpeg, CameraSession};
pub use file::read_as_data_url;

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::api::client::js_message;

/// Media errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MediaError {
    /// No camera API or no camera device
    #[error("Camera not available: {0}")]
    Unavailable(String),

    /// The user or browser refused camera access
    #[error("Camera access denied: {0}")]
    Denied(String),

    /// A DOM element the operation needs is not mounted
    #[error("Missing element: {0}")]
    MissingElement(&'static str),

    /// The video has not produced a frame yet
    #[error("Camera is not ready yet")]
    NotReady,

    /// The canvas could not produce a JPEG
    #[error("Could not encode image: {0}")]
    Encode(String),

    /// The file could not be read
    #[error("Could not read file: {0}")]
    Read(String),

    /// Any other thrown JS value
    #[error("Browser error: {0}")]
    Js(String),
}

impl From<JsValue> for MediaError {
    fn from(value: JsValue) -> Self {
        MediaError::Js(js_message(&value))
    }
}
