//! Capture State
//!
//! State machine behind the capture page. It owns the camera stream while the
//! preview is live and the held receipt image once one exists. Browser work
//! happens outside; the machine only records results and guarantees that any
//! stream it gives up is released.

use leptos::*;

use crate::api::{ApiResult, CreatedExpense, ExpenseApi, ExpenseDetails};
use crate::media::MediaError;
use crate::money::{parse_amount, AmountParseError};

pub const CAMERA_DENIED_MESSAGE: &str = "Camera access denied or not available";
pub const NO_IMAGE_MESSAGE: &str = "Please select or capture an image";

/// A camera stream whose tracks must be stopped when it is no longer used
pub trait CameraStream {
    /// Stop every track and detach the stream. Safe to call more than once.
    fn release(&mut self);

    /// Number of tracks still producing frames
    fn live_tracks(&self) -> usize;
}

/// The image waiting to be submitted
#[derive(Debug, Clone, PartialEq)]
pub struct HeldImage<I> {
    pub payload: I,
    pub name: String,
    /// `data:` URL shown in the preview
    pub preview: String,
}

impl<I> HeldImage<I> {
    pub fn new(payload: I, name: impl Into<String>, preview: impl Into<String>) -> Self {
        Self {
            payload,
            name: name.into(),
            preview: preview.into(),
        }
    }
}

/// Where the image will come from
enum Stage<S, I> {
    Idle,
    CameraActive {
        stream: S,
        /// Image held before the camera opened; restored on cancel
        stashed: Option<HeldImage<I>>,
    },
    ImageReady(HeldImage<I>),
}

/// Inline message tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Message shown under the submit button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

/// Raw text of the optional details inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailsForm {
    pub vendor: String,
    pub description: String,
    pub date: String,
    pub amount: String,
    pub category: String,
}

/// Invalid manual details
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DetailsError {
    #[error(transparent)]
    InvalidAmount(#[from] AmountParseError),

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),
}

impl DetailsForm {
    /// Validate into the fields sent with the upload; blank inputs are omitted
    pub fn parse(&self) -> Result<ExpenseDetails, DetailsError> {
        let text = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };

        let date = match text(&self.date) {
            Some(d) => {
                chrono::NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                    .map_err(|_| DetailsError::InvalidDate(d.clone()))?;
                Some(d)
            }
            None => None,
        };

        let amount_cents = match text(&self.amount) {
            Some(a) => Some(parse_amount(&a)?.0),
            None => None,
        };

        Ok(ExpenseDetails {
            vendor: text(&self.vendor),
            description: text(&self.description),
            date,
            amount_cents,
            category: text(&self.category),
        })
    }
}

/// An upload the machine has committed to
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUpload<I> {
    pub image: I,
    pub details: ExpenseDetails,
}

/// Result of a finished submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(String),
    Failed,
}

/// Tags one file-picker selection; reads finishing after a newer selection
/// carry a stale ticket and are dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTicket(u64);

/// Capture page state machine
pub struct CaptureMachine<S: CameraStream, I> {
    stage: Stage<S, I>,
    selection_seq: u64,
    camera_pending: bool,
    submitting: bool,
    message: Option<StatusMessage>,
}

impl<S: CameraStream, I> Default for CaptureMachine<S, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: CameraStream, I> CaptureMachine<S, I> {
    pub fn new() -> Self {
        Self {
            stage: Stage::Idle,
            selection_seq: 0,
            camera_pending: false,
            submitting: false,
            message: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.stage, Stage::Idle)
    }

    pub fn camera_active(&self) -> bool {
        matches!(self.stage, Stage::CameraActive { .. })
    }

    pub fn camera_pending(&self) -> bool {
        self.camera_pending
    }

    /// Live stream, if the camera is open
    pub fn camera(&self) -> Option<&S> {
        match &self.stage {
            Stage::CameraActive { stream, .. } => Some(stream),
            _ => None,
        }
    }

    /// Image that a submit would send
    pub fn held_image(&self) -> Option<&HeldImage<I>> {
        match &self.stage {
            Stage::ImageReady(image) => Some(image),
            _ => None,
        }
    }

    pub fn preview(&self) -> Option<&str> {
        self.held_image().map(|image| image.preview.as_str())
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        self.held_image().is_some() && !self.submitting
    }

    // ============ Camera ============

    /// Mark a camera request as started.
    ///
    /// Returns false when the camera is already open or being opened, in
    /// which case the caller must not request it again.
    pub fn request_camera(&mut self) -> bool {
        if self.camera_pending || self.camera_active() || self.submitting {
            return false;
        }
        self.camera_pending = true;
        self.message = None;
        true
    }

    /// The camera request produced a stream
    pub fn camera_opened(&mut self, mut stream: S) {
        self.camera_pending = false;

        let stage = std::mem::replace(&mut self.stage, Stage::Idle);
        self.stage = match stage {
            Stage::Idle => Stage::CameraActive {
                stream,
                stashed: None,
            },
            Stage::ImageReady(image) => Stage::CameraActive {
                stream,
                stashed: Some(image),
            },
            active @ Stage::CameraActive { .. } => {
                stream.release();
                active
            }
        };
    }

    /// The camera request failed; the current stage is kept
    pub fn camera_failed(&mut self, error: &MediaError) {
        tracing::warn!(%error, "camera unavailable");
        self.camera_pending = false;
        self.message = Some(StatusMessage::error(CAMERA_DENIED_MESSAGE));
    }

    /// Close the preview without taking a photo
    pub fn cancel_camera(&mut self) {
        let stage = std::mem::replace(&mut self.stage, Stage::Idle);
        self.stage = match stage {
            Stage::CameraActive {
                mut stream,
                stashed,
            } => {
                stream.release();
                stashed.map_or(Stage::Idle, Stage::ImageReady)
            }
            other => other,
        };
    }

    /// A snapshot of the live preview finished encoding.
    ///
    /// Ignored if the camera was closed while the frame was being encoded.
    pub fn frame_captured(&mut self, image: HeldImage<I>) {
        let stage = std::mem::replace(&mut self.stage, Stage::Idle);
        self.stage = match stage {
            Stage::CameraActive { mut stream, .. } => {
                stream.release();
                self.message = None;
                self.selection_seq += 1;
                Stage::ImageReady(image)
            }
            other => other,
        };
    }

    /// Snapshotting the preview failed; the camera stays open
    pub fn capture_failed(&mut self, error: &MediaError) {
        tracing::warn!(%error, "frame capture failed");
        self.message = Some(StatusMessage::error(format!("Could not capture photo: {}", error)));
    }

    /// A file was picked and its preview is being read.
    ///
    /// Any read still running for an earlier selection becomes stale.
    pub fn begin_selection(&mut self) -> SelectionTicket {
        self.selection_seq += 1;
        SelectionTicket(self.selection_seq)
    }

    fn is_current(&self, ticket: SelectionTicket) -> bool {
        ticket.0 == self.selection_seq
    }

    /// The picked file is decoded; it replaces any held image and closes the
    /// camera unless a newer image has arrived since
    pub fn image_selected(&mut self, ticket: SelectionTicket, image: HeldImage<I>) {
        if !self.is_current(ticket) {
            tracing::debug!(name = %image.name, "dropping superseded selection");
            return;
        }

        self.release_camera();
        self.stage = Stage::ImageReady(image);
        self.message = None;
    }

    /// The picked file could not be decoded for preview
    pub fn image_failed(&mut self, ticket: SelectionTicket, error: &MediaError) {
        if !self.is_current(ticket) {
            return;
        }

        tracing::warn!(%error, "image selection failed");
        self.message = Some(StatusMessage::error(format!("Could not read image: {}", error)));
    }

    /// Release the camera, keeping whatever image was stashed
    pub fn teardown(&mut self) {
        self.release_camera();
        self.camera_pending = false;
    }

    fn release_camera(&mut self) {
        if let Stage::CameraActive { .. } = self.stage {
            self.cancel_camera();
        }
    }

    // ============ Submission ============

    /// Commit to an upload, or record why it cannot start
    pub fn begin_submit(&mut self, form: &DetailsForm) -> Option<PendingUpload<I>>
    where
        I: Clone,
    {
        if self.submitting {
            return None;
        }

        let image = match self.held_image() {
            Some(image) => image.payload.clone(),
            None => {
                self.message = Some(StatusMessage::error(NO_IMAGE_MESSAGE));
                return None;
            }
        };

        let details = match form.parse() {
            Ok(details) => details,
            Err(e) => {
                self.message = Some(StatusMessage::error(e.to_string()));
                return None;
            }
        };

        self.submitting = true;
        self.message = None;
        Some(PendingUpload { image, details })
    }

    /// Record the backend's answer to the upload started by `begin_submit`
    pub fn finish_submit(&mut self, result: ApiResult<CreatedExpense>) -> SubmitOutcome {
        self.submitting = false;

        match result {
            Ok(created) => {
                tracing::info!(expense_id = %created.id, "expense created");
                if let Stage::ImageReady(_) = self.stage {
                    self.stage = Stage::Idle;
                }
                self.selection_seq += 1;
                self.message = Some(StatusMessage::success(format!(
                    "Expense created successfully! ID: {}",
                    created.id
                )));
                SubmitOutcome::Created(created.id)
            }
            Err(e) => {
                tracing::warn!(error = %e, "expense upload failed");
                self.message = Some(StatusMessage::error(format!("Upload failed: {}", e)));
                SubmitOutcome::Failed
            }
        }
    }
}

impl<S: CameraStream, I> Drop for CaptureMachine<S, I> {
    fn drop(&mut self) {
        self.release_camera();
    }
}

/// Run one submission from the machine held in `capture`.
///
/// Returns `None` when nothing was sent: no image, invalid details, an upload
/// already in flight, or the signal disposed.
pub async fn submit_capture<S, A>(
    capture: RwSignal<CaptureMachine<S, A::Image>>,
    api: &A,
    form: &DetailsForm,
) -> Option<SubmitOutcome>
where
    S: CameraStream + 'static,
    A: ExpenseApi + ?Sized,
{
    let pending = capture.try_update(|m| m.begin_submit(form)).flatten()?;

    tracing::info!(fields = pending.details.form_fields().len(), "submitting receipt");
    let result = api.create_expense(&pending.image, &pending.details).await;

    capture.try_update(|m| m.finish_submit(result))
}
