//! Viewer-facing helpers for a shared file.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Coarse kind of a shared file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Raster or vector image.
    Image,
    /// Text or office document.
    Document,
    /// Video.
    Video,
    /// Audio.
    Audio,
    /// Anything else.
    File,
}

impl FileKind {
    /// Classifies `name` by its last extension, case-insensitively.
    pub fn from_name(name: &str) -> Self {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "svg" | "webp" => Self::Image,
            "pdf" | "doc" | "docx" | "txt" | "rtf" => Self::Document,
            "mp4" | "mov" | "avi" | "webm" => Self::Video,
            "mp3" | "wav" | "ogg" => Self::Audio,
            _ => Self::File,
        }
    }

    /// Human label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Document => "Document",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::File => "File",
        }
    }
}

/// "Expires today", "Expires tomorrow" or "Expires in N days".
///
/// Days are the ceiling of the absolute distance, so anything within the
/// next 24 hours reads as "tomorrow".
pub fn expiry_label(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    const DAY_MS: i64 = 24 * 60 * 60 * 1000;
    let diff_ms = (expires_at - now).num_milliseconds().abs();
    let days = (diff_ms + DAY_MS - 1) / DAY_MS;

    match days {
        0 => "Expires today".to_string(),
        1 => "Expires tomorrow".to_string(),
        n => format!("Expires in {n} days"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_file_kind_from_extension() {
        assert_eq!(FileKind::from_name("photo.JPG"), FileKind::Image);
        assert_eq!(FileKind::from_name("report.pdf"), FileKind::Document);
        assert_eq!(FileKind::from_name("clip.final.webm"), FileKind::Video);
        assert_eq!(FileKind::from_name("song.ogg"), FileKind::Audio);
        assert_eq!(FileKind::from_name("archive.tar.gz"), FileKind::File);
        assert_eq!(FileKind::from_name("README"), FileKind::File);
    }

    #[test]
    fn test_expiry_label() {
        let now = Utc::now();
        assert_eq!(expiry_label(now, now), "Expires today");
        assert_eq!(expiry_label(now + Duration::hours(3), now), "Expires tomorrow");
        assert_eq!(expiry_label(now + Duration::days(1), now), "Expires tomorrow");
        assert_eq!(
            expiry_label(now + Duration::days(6) + Duration::hours(1), now),
            "Expires in 7 days"
        );
    }
}
