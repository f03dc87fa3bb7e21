//! File Reading
//!
//! `FileReader` as a future.

use js_sys::{Function, Promise};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, FileReader};

use super::MediaError;
use crate::api::client::js_message;

/// Decode a blob into a `data:` URL for previews
pub async fn read_as_data_url(blob: &Blob) -> Result<String, MediaError> {
    let reader = FileReader::new()?;

    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let onload = {
            let reader = reader.clone();
            let reject = reject.clone();
            Closure::once_into_js(move |_event: JsValue| {
                let outcome = match reader.result() {
                    Ok(result) => resolve.call1(&JsValue::NULL, &result),
                    Err(e) => reject.call1(&JsValue::NULL, &e),
                };
                if let Err(e) = outcome {
                    tracing::warn!(error = %js_message(&e), "FileReader callback failed");
                }
            })
        };

        let onerror = Closure::once_into_js(move |_event: JsValue| {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("read failed"));
        });

        reader.set_onload(Some(onload.unchecked_ref()));
        reader.set_onerror(Some(onerror.unchecked_ref()));
    });

    reader
        .read_as_data_url(blob)
        .map_err(|e| MediaError::Read(js_message(&e)))?;

    let result = JsFuture::from(promise)
        .await
        .map_err(|e| MediaError::Read(js_message(&e)))?;

    result
        .as_string()
        .ok_or_else(|| MediaError::Read("reader returned no text".to_string()))
}
