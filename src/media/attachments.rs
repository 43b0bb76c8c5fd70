use mime::Mime;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::debug;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_VIDEO_BYTES: usize = 50 * 1024 * 1024;

const IMAGE_SUBTYPES: [&str; 3] = ["jpeg", "jpg", "png"];
const VIDEO_SUBTYPES: [&str; 4] = ["mp4", "quicktime", "x-msvideo", "webm"];

pub const MISSING_MEDIA_MESSAGE: &str = "Please upload at least one image or video";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// A file the user picked, before it is accepted.
#[derive(Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub file_name: String,
    /// Declared MIME type, e.g. `image/png`.
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for MediaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.size())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaRejection {
    #[error("Images must not exceed 5MB")]
    ImageTooLarge,
    #[error("Videos must not exceed 50MB")]
    VideoTooLarge,
    #[error("Only JPG, PNG images or MP4, MOV, AVI, WEBM videos are accepted")]
    UnsupportedType(String),
}

/// Decide what a file is from its declared type, and whether it fits.
pub fn classify(file: &MediaFile) -> Result<MediaKind, MediaRejection> {
    let unsupported = || MediaRejection::UnsupportedType(file.mime_type.clone());
    let parsed = parse_mime(&file.mime_type).ok_or_else(unsupported)?;
    let subtype = parsed.subtype().as_str();

    let top = parsed.type_();
    let (kind, limit, too_large) = if top == mime::IMAGE && IMAGE_SUBTYPES.contains(&subtype) {
        (MediaKind::Image, MAX_IMAGE_BYTES, MediaRejection::ImageTooLarge)
    } else if top == mime::VIDEO && VIDEO_SUBTYPES.contains(&subtype) {
        (MediaKind::Video, MAX_VIDEO_BYTES, MediaRejection::VideoTooLarge)
    } else {
        return Err(unsupported());
    };
    if file.size() > limit {
        return Err(too_large);
    }
    Ok(kind)
}

fn parse_mime(declared: &str) -> Option<Mime> {
    declared.trim().to_ascii_lowercase().parse().ok()
}

/// Issues and revokes the preview URLs shown next to picked files.
pub trait PreviewRegistry: Send + Sync {
    fn create(&self, file: &MediaFile) -> String;
    fn release(&self, url: &str);
}

/// In-process registry handing out `blob:` style URLs.
#[derive(Debug, Default)]
pub struct BlobUrlRegistry {
    live: Mutex<HashSet<String>>,
}

impl BlobUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.live
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(url)
    }
}

impl PreviewRegistry for BlobUrlRegistry {
    fn create(&self, file: &MediaFile) -> String {
        let url = format!("blob:gradwork/{}", uuid::Uuid::new_v4());
        debug!(file = %file.file_name, %url, "Preview created");
        self.live
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(url.clone());
        url
    }

    fn release(&self, url: &str) {
        self.live
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(url);
    }
}

/// Owns one preview URL and revokes it when dropped, so every preview is
/// released exactly once whether it is removed or the wizard is torn down.
pub struct PreviewHandle {
    url: String,
    registry: Arc<dyn PreviewRegistry>,
}

impl PreviewHandle {
    pub fn create(registry: Arc<dyn PreviewRegistry>, file: &MediaFile) -> Self {
        let url = registry.create(file);
        Self { url, registry }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.registry.release(&self.url);
    }
}

impl fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PreviewHandle").field(&self.url).finish()
    }
}

/// An accepted file together with its preview. The declared MIME type is
/// stored in its canonical `type/subtype` form.
#[derive(Debug)]
pub struct MediaAttachment {
    pub file: MediaFile,
    pub kind: MediaKind,
    preview: PreviewHandle,
}

impl MediaAttachment {
    pub fn new(mut file: MediaFile, kind: MediaKind, registry: Arc<dyn PreviewRegistry>) -> Self {
        if let Some(parsed) = parse_mime(&file.mime_type) {
            file.mime_type = parsed.essence_str().to_string();
        }
        let preview = PreviewHandle::create(registry, &file);
        Self {
            file,
            kind,
            preview,
        }
    }

    pub fn preview_url(&self) -> &str {
        self.preview.url()
    }
}
