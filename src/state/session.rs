/// Session state for one interactive edit cycle
///
/// A session owns at most one input image and at most one generation outcome
/// at a time. The generation lifecycle is an explicit state machine
/// (Idle -> Submitting -> Succeeded | Failed) so that "exactly one of result
/// or error, never both" holds by construction rather than by flag juggling.

use iced::widget::image::Handle;

use crate::data_uri;
use crate::error::{AppError, Result};
use crate::state::modes::{AgeDirection, EditMode};

/// Where an input image came from. Informational only; all sources converge
/// on the same [`ImageAsset`] representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Picker,
    DragDrop,
    Camera,
}

/// One in-memory input image: raw bytes, a preview handle for the UI, and a
/// self-describing base64 payload for the request builder.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub data_uri: String,
    pub preview: Handle,
    pub source: ImageSource,
}

impl ImageAsset {
    /// Build an asset from raw file bytes, sniffing the MIME type.
    ///
    /// Non-image bytes are rejected so callers can surface an error without
    /// touching any existing asset.
    pub fn from_bytes(bytes: Vec<u8>, source: ImageSource) -> Result<Self> {
        let mime = data_uri::sniff_mime(&bytes)
            .ok_or_else(|| AppError::InvalidInput("Please upload an image file.".into()))?;
        Ok(Self::from_parts(bytes, mime.to_string(), source))
    }

    /// Build an asset when the MIME type is already known (camera captures
    /// are always JPEG-encoded).
    pub fn from_parts(bytes: Vec<u8>, mime: String, source: ImageSource) -> Self {
        let data_uri = data_uri::encode(&mime, &bytes);
        let preview = Handle::from_bytes(bytes.clone());
        Self {
            bytes,
            mime,
            data_uri,
            preview,
            source,
        }
    }
}

/// A successfully generated image, ready for display and download.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub data_uri: String,
    pub preview: Handle,
}

impl GeneratedImage {
    /// Build from a response's raw base64 body and declared MIME type.
    pub fn from_base64(base64_body: &str, mime: String) -> Result<Self> {
        let data_uri = data_uri::build(&mime, base64_body);
        let bytes = data_uri::decode_bytes(base64_body)?;
        let preview = Handle::from_bytes(bytes.clone());
        Ok(Self {
            bytes,
            mime,
            data_uri,
            preview,
        })
    }
}

/// Lifecycle of one generation request.
#[derive(Debug, Clone, Default)]
pub enum GenerationState {
    /// No request in flight and no outcome shown.
    #[default]
    Idle,
    /// A request is in flight; the trigger is disabled.
    Submitting,
    /// The endpoint returned an image.
    Succeeded(GeneratedImage),
    /// The attempt failed with a user-facing message.
    Failed(String),
}

impl GenerationState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, GenerationState::Submitting)
    }

    pub fn result(&self) -> Option<&GeneratedImage> {
        match self {
            GenerationState::Succeeded(image) => Some(image),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            GenerationState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// All mutable state for the current interactive session.
#[derive(Debug, Default)]
pub struct Session {
    asset: Option<ImageAsset>,
    generation: GenerationState,
    pub mode: EditMode,
    pub age: AgeDirection,
    pub custom_text: String,
}

impl Session {
    pub fn asset(&self) -> Option<&ImageAsset> {
        self.asset.as_ref()
    }

    pub fn generation(&self) -> &GenerationState {
        &self.generation
    }

    /// Install a new input image, replacing any previous one wholesale.
    /// Any prior result or error is cleared.
    pub fn set_asset(&mut self, asset: ImageAsset) {
        self.asset = Some(asset);
        self.generation = GenerationState::Idle;
    }

    /// Drop the image and every outcome, returning to the initial screen.
    pub fn reset(&mut self) {
        self.asset = None;
        self.generation = GenerationState::Idle;
        self.custom_text.clear();
    }

    /// Switch the active edit mode. Free-text instructions belong to the
    /// mode that was active when they were typed, so they are discarded.
    pub fn select_mode(&mut self, mode: EditMode) {
        self.mode = mode;
        self.custom_text.clear();
    }

    /// The generate trigger is enabled only with an image loaded and no
    /// request in flight.
    pub fn can_generate(&self) -> bool {
        self.asset.is_some() && !self.generation.is_submitting()
    }

    /// Transition Idle/Succeeded/Failed -> Submitting, clearing any prior
    /// outcome. Returns false (and leaves state untouched) when the trigger
    /// should have been disabled.
    pub fn begin_generation(&mut self) -> bool {
        if !self.can_generate() {
            return false;
        }
        self.generation = GenerationState::Submitting;
        true
    }

    /// Record the outcome of the in-flight request.
    pub fn finish_generation(&mut self, outcome: Result<GeneratedImage>) {
        self.generation = match outcome {
            Ok(image) => GenerationState::Succeeded(image),
            Err(err) => GenerationState::Failed(err.to_string()),
        };
    }

    /// Surface an error outside the generation cycle (bad drop, camera
    /// failure). The current asset is left untouched.
    pub fn fail(&mut self, err: &AppError) {
        self.generation = GenerationState::Failed(err.to_string());
    }
}
