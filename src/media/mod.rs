pub mod attachments;
pub mod thumbnails;

pub use attachments::{
    BlobUrlRegistry, MISSING_MEDIA_MESSAGE, MediaAttachment, MediaFile, MediaKind, MediaRejection,
    PreviewRegistry, classify,
};
pub use thumbnails::{PLACEHOLDER_THUMBNAIL, PlaceholderExtractor, ThumbnailExtractor};
