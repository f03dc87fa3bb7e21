//! Camera Capture
//!
//! Acquires the device camera, owns the resulting stream, and snapshots
//! frames from the preview video into JPEG files.

use gloo_timers::future::TimeoutFuture;
use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, CanvasRenderingContext2d, File, FilePropertyBag, HtmlCanvasElement, HtmlVideoElement,
    MediaStream, MediaStreamConstraints, MediaStreamTrack, MediaStreamTrackState,
};

use super::MediaError;
use crate::api::client::js_message;
use crate::state::CameraStream;

/// File name given to camera snapshots
pub const SNAPSHOT_NAME: &str = "receipt.jpg";

const JPEG_MIME: &str = "image/jpeg";
const JPEG_QUALITY: f64 = 0.8;

/// Polls for the first decoded frame before giving up
const READY_POLL_MS: u32 = 50;
const READY_POLL_ATTEMPTS: u32 = 40;

/// Request a video stream, preferring the rear-facing camera
pub async fn open_rear_camera() -> Result<MediaStream, MediaError> {
    let window = web_sys::window().ok_or(MediaError::Unavailable("no window".to_string()))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| MediaError::Unavailable(js_message(&e)))?;

    let video = Object::new();
    Reflect::set(&video, &"facingMode".into(), &"environment".into())?;

    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&video);
    constraints.set_audio(&JsValue::FALSE);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| MediaError::Unavailable(js_message(&e)))?;

    let stream = JsFuture::from(promise)
        .await
        .map_err(|e| MediaError::Denied(js_message(&e)))?;

    Ok(stream.unchecked_into::<MediaStream>())
}

/// A live camera stream attached to a preview video.
///
/// Dropping the session stops every track and detaches the stream.
pub struct CameraSession {
    stream: MediaStream,
    video: HtmlVideoElement,
    released: bool,
}

impl CameraSession {
    /// Attach `stream` to `video` and start playback.
    ///
    /// On failure the stream is released before the error is returned.
    pub fn attach(stream: MediaStream, video: HtmlVideoElement) -> Result<Self, MediaError> {
        let mut session = Self {
            stream,
            video,
            released: false,
        };

        session.video.set_src_object(Some(&session.stream));
        if let Err(e) = session.video.play() {
            session.release();
            return Err(MediaError::from(e));
        }

        tracing::info!(tracks = session.live_tracks(), "camera attached");
        Ok(session)
    }

    /// Preview element the stream is attached to
    pub fn video(&self) -> &HtmlVideoElement {
        &self.video
    }

    fn tracks(&self) -> impl Iterator<Item = MediaStreamTrack> {
        self.stream
            .get_tracks()
            .iter()
            .filter_map(|t| t.dyn_into::<MediaStreamTrack>().ok())
            .collect::<Vec<_>>()
            .into_iter()
    }
}

impl CameraStream for CameraSession {
    fn release(&mut self) {
        if self.released {
            return;
        }

        for track in self.tracks() {
            track.stop();
        }
        self.video.set_src_object(None);
        self.released = true;

        tracing::info!("camera released");
    }

    fn live_tracks(&self) -> usize {
        self.tracks()
            .filter(|t| t.ready_state() == MediaStreamTrackState::Live)
            .count()
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.release();
    }
}

/// Snapshot the current video frame into a JPEG file named [`SNAPSHOT_NAME`]
pub async fn snapshot_jpeg(video: &HtmlVideoElement) -> Result<File, MediaError> {
    wait_for_frame(video).await?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(MediaError::MissingElement("document"))?;

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| MediaError::Encode("canvas unavailable".to_string()))?;
    canvas.set_width(video.video_width());
    canvas.set_height(video.video_height());

    let context = canvas
        .get_context("2d")?
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
        .ok_or(MediaError::Encode("2d context unavailable".to_string()))?;
    context.draw_image_with_html_video_element(video, 0.0, 0.0)?;

    let blob = canvas_to_blob(&canvas).await?;

    let options = FilePropertyBag::new();
    options.set_type(JPEG_MIME);
    let file = File::new_with_blob_sequence_and_options(
        &Array::of1(&blob),
        SNAPSHOT_NAME,
        &options,
    )?;

    tracing::debug!(
        width = video.video_width(),
        height = video.video_height(),
        bytes = file.size(),
        "frame captured"
    );
    Ok(file)
}

async fn wait_for_frame(video: &HtmlVideoElement) -> Result<(), MediaError> {
    for _ in 0..READY_POLL_ATTEMPTS {
        if video.video_width() > 0 && video.video_height() > 0 {
            return Ok(());
        }
        TimeoutFuture::new(READY_POLL_MS).await;
    }
    Err(MediaError::NotReady)
}

async fn canvas_to_blob(canvas: &HtmlCanvasElement) -> Result<Blob, MediaError> {
    let mut start_error = None;

    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let callback = Closure::once_into_js(move |blob: JsValue| {
            let _ = if blob.is_null() {
                reject.call1(&JsValue::NULL, &JsValue::from_str("empty frame"))
            } else {
                resolve.call1(&JsValue::NULL, &blob)
            };
        });

        if let Err(e) = canvas.to_blob_with_type_and_encoder_options(
            callback.unchecked_ref(),
            JPEG_MIME,
            &JsValue::from_f64(JPEG_QUALITY),
        ) {
            start_error = Some(e);
        }
    });

    if let Some(e) = start_error {
        return Err(MediaError::Encode(js_message(&e)));
    }

    let blob = JsFuture::from(promise)
        .await
        .map_err(|e| MediaError::Encode(js_message(&e)))?;

    blob.dyn_into::<Blob>()
        .map_err(|_| MediaError::Encode("canvas produced no blob".to_string()))
}
