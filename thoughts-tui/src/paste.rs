//! Pasted payload classification.
//!
//! A browser paste can carry an image file directly; a terminal paste is
//! always text. The closest a terminal gets to "the clipboard holds an
//! image" is a pasted path to an image file on disk, so that is what gets
//! intercepted and uploaded instead of inserted into the composer.

use image::ImageFormat;
use std::path::Path;
use tracing::debug;

/// What a paste event turned out to contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paste {
    /// The payload pointed at a readable image file.
    Image {
        filename: String,
        bytes: Vec<u8>,
        mime: &'static str,
    },
    /// Ordinary text, to be inserted into the composer as-is.
    Text(String),
}

/// Classify a pasted payload.
///
/// Only a single-line paste naming an existing file whose contents sniff
/// as a known image format becomes [`Paste::Image`]; everything else is
/// passed through as text, including paths that fail to read or sniff.
pub fn classify(pasted: &str) -> Paste {
    let candidate = pasted.trim();

    if candidate.is_empty() || candidate.contains('\n') {
        return Paste::Text(pasted.to_string());
    }

    // File managers paste file URLs; shells paste plain paths.
    let path_str = candidate.strip_prefix("file://").unwrap_or(candidate);
    let path = Path::new(path_str);

    if !path.is_file() {
        return Paste::Text(pasted.to_string());
    }

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(error = %e, "pasted path exists but could not be read");
            return Paste::Text(pasted.to_string());
        }
    };

    let mime = match image::guess_format(&bytes) {
        Ok(ImageFormat::Png) => "image/png",
        Ok(ImageFormat::Jpeg) => "image/jpeg",
        Ok(ImageFormat::Gif) => "image/gif",
        Ok(ImageFormat::WebP) => "image/webp",
        Ok(ImageFormat::Avif) => "image/avif",
        _ => return Paste::Text(pasted.to_string()),
    };

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "pasted-image".to_string());

    Paste::Image {
        filename,
        bytes,
        mime,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn write_png(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&PNG_MAGIC).unwrap();
        file.write_all(&[0u8; 16]).unwrap();
        path
    }

    #[test]
    fn test_plain_text_stays_text() {
        assert_eq!(
            classify("hello world"),
            Paste::Text("hello world".into())
        );
    }

    #[test]
    fn test_nonexistent_path_stays_text() {
        assert_eq!(
            classify("/no/such/file.png"),
            Paste::Text("/no/such/file.png".into())
        );
    }

    #[test]
    fn test_image_file_path_is_intercepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(&dir, "shot.png");

        match classify(&path.to_string_lossy()) {
            Paste::Image {
                filename,
                bytes,
                mime,
            } => {
                assert_eq!(filename, "shot.png");
                assert_eq!(mime, "image/png");
                assert_eq!(&bytes[..8], &PNG_MAGIC);
            }
            other => panic!("expected image paste, got {other:?}"),
        }
    }

    #[test]
    fn test_file_url_is_intercepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(&dir, "shot.png");
        let url = format!("file://{}", path.to_string_lossy());

        assert!(matches!(classify(&url), Paste::Image { .. }));
    }

    #[test]
    fn test_non_image_file_stays_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "just text").unwrap();

        let pasted = path.to_string_lossy().into_owned();
        assert_eq!(classify(&pasted), Paste::Text(pasted.clone()));
    }

    #[test]
    fn test_multiline_paste_stays_text() {
        let pasted = "line one\n/tmp/shot.png";
        assert_eq!(classify(pasted), Paste::Text(pasted.into()));
    }
}
