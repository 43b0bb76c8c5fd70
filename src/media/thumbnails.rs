use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::models::gigs::{MediaItem, MediaType};

pub const PLACEHOLDER_THUMBNAIL: &str = "/placeholder.jpg";

#[derive(Debug, Error)]
#[error("thumbnail extraction failed: {0}")]
pub struct ThumbnailError(pub String);

/// Produces a still image for a video, e.g. by decoding its first frame.
#[async_trait]
pub trait ThumbnailExtractor: Send + Sync {
    async fn first_frame(&self, video_url: &str) -> Result<String, ThumbnailError>;
}

/// Used when no decoder is available: every video gets the placeholder.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderExtractor;

#[async_trait]
impl ThumbnailExtractor for PlaceholderExtractor {
    async fn first_frame(&self, _video_url: &str) -> Result<String, ThumbnailError> {
        Ok(PLACEHOLDER_THUMBNAIL.to_string())
    }
}

/// Never fails and never waits longer than `timeout`.
pub async fn thumbnail_or_placeholder(
    extractor: &dyn ThumbnailExtractor,
    video_url: &str,
    timeout: Duration,
) -> String {
    match tokio::time::timeout(timeout, extractor.first_frame(video_url)).await {
        Ok(Ok(thumbnail)) => thumbnail,
        Ok(Err(e)) => {
            warn!(url = video_url, "{e}");
            PLACEHOLDER_THUMBNAIL.to_string()
        }
        Err(_) => {
            warn!(url = video_url, ?timeout, "Timed out extracting video thumbnail");
            PLACEHOLDER_THUMBNAIL.to_string()
        }
    }
}

fn needs_thumbnail(item: &MediaItem) -> bool {
    item.kind == MediaType::Video && item.thumbnail_url.is_none()
}

/// Give every video without a thumbnail the placeholder, so the gallery can
/// render before extraction finishes.
pub fn with_placeholders(media: &[MediaItem]) -> Vec<MediaItem> {
    media
        .iter()
        .map(|item| {
            let mut item = item.clone();
            if needs_thumbnail(&item) {
                item.thumbnail_url = Some(PLACEHOLDER_THUMBNAIL.to_string());
            }
            item
        })
        .collect()
}

/// Replace missing video thumbnails with extracted ones.
pub async fn fill_video_thumbnails(
    media: &[MediaItem],
    extractor: &dyn ThumbnailExtractor,
    timeout: Duration,
) -> Vec<MediaItem> {
    let mut out = Vec::with_capacity(media.len());
    for item in media {
        let mut item = item.clone();
        if needs_thumbnail(&item) {
            item.thumbnail_url = Some(thumbnail_or_placeholder(extractor, &item.url, timeout).await);
        }
        out.push(item);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Slow;

    #[async_trait]
    impl ThumbnailExtractor for Slow {
        async fn first_frame(&self, _video_url: &str) -> Result<String, ThumbnailError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("data:image/jpeg;base64,late".to_string())
        }
    }

    struct Broken;

    #[async_trait]
    impl ThumbnailExtractor for Broken {
        async fn first_frame(&self, video_url: &str) -> Result<String, ThumbnailError> {
            Err(ThumbnailError(format!("cannot decode {video_url}")))
        }
    }

    struct Echo;

    #[async_trait]
    impl ThumbnailExtractor for Echo {
        async fn first_frame(&self, video_url: &str) -> Result<String, ThumbnailError> {
            Ok(format!("{video_url}.jpg"))
        }
    }

    fn item(url: &str, kind: MediaType, thumb: Option<&str>) -> MediaItem {
        MediaItem {
            url: url.to_string(),
            kind,
            thumbnail_url: thumb.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn slow_extractor_falls_back_within_timeout() {
        let started = std::time::Instant::now();
        let thumb = thumbnail_or_placeholder(&Slow, "v.mp4", Duration::from_millis(50)).await;
        assert_eq!(thumb, PLACEHOLDER_THUMBNAIL);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn failing_extractor_falls_back() {
        let thumb = thumbnail_or_placeholder(&Broken, "v.mp4", Duration::from_secs(1)).await;
        assert_eq!(thumb, PLACEHOLDER_THUMBNAIL);
    }

    #[tokio::test]
    async fn only_videos_without_thumbnails_are_touched() {
        let media = vec![
            item("a.png", MediaType::Image, None),
            item("b.mp4", MediaType::Video, None),
            item("c.mp4", MediaType::Video, Some("c-thumb.jpg")),
        ];

        let initial = with_placeholders(&media);
        assert_eq!(initial[0].thumbnail_url, None);
        assert_eq!(initial[1].thumbnail_url.as_deref(), Some(PLACEHOLDER_THUMBNAIL));

        let filled = fill_video_thumbnails(&media, &Echo, Duration::from_secs(1)).await;
        assert_eq!(filled[0].thumbnail_url, None);
        assert_eq!(filled[1].thumbnail_url.as_deref(), Some("b.mp4.jpg"));
        assert_eq!(filled[2].thumbnail_url.as_deref(), Some("c-thumb.jpg"));
    }
}
