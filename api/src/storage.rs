use std::path::Path;

use uuid::Uuid;

/// MIME types accepted for episode uploads.
pub const ALLOWED_AUDIO_TYPES: [&str; 4] =
    ["audio/mpeg", "audio/wav", "audio/x-m4a", "audio/flac"];

pub fn validate_file_type(content_type: &str) -> bool {
    ALLOWED_AUDIO_TYPES.contains(&content_type)
}

pub fn validate_file_size(file_size: u64, max_file_size_mb: u64) -> bool {
    file_size <= max_file_size_mb * 1024 * 1024
}

/// Generate a collision-resistant storage key, independent of the
/// client-supplied filename. The original extension is kept so the format
/// stays recognizable on disk.
pub fn generate_unique_filename(original_filename: &str) -> String {
    match Path::new(original_filename)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    }
}

/// The file format recorded on the episode row, taken from the original
/// filename's extension.
pub fn file_format(original_filename: &str) -> Option<String> {
    Path::new(original_filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

/// Write the uploaded bytes under the configured upload directory and
/// return the stored path.
pub async fn store_audio_file(
    upload_dir: &str,
    filename: &str,
    data: &[u8],
) -> std::io::Result<String> {
    tokio::fs::create_dir_all(upload_dir).await?;

    let path = Path::new(upload_dir).join(filename);
    tokio::fs::write(&path, data).await?;

    Ok(path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_allowed_audio_types() {
        for content_type in ALLOWED_AUDIO_TYPES {
            assert!(validate_file_type(content_type));
        }
    }

    #[test]
    fn rejects_other_content_types() {
        assert!(!validate_file_type("video/mp4"));
        assert!(!validate_file_type("application/octet-stream"));
        assert!(!validate_file_type("audio/ogg"));
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert!(validate_file_size(500 * 1024 * 1024, 500));
        assert!(!validate_file_size(500 * 1024 * 1024 + 1, 500));
        assert!(validate_file_size(0, 500));
    }

    #[test]
    fn unique_filename_keeps_the_extension() {
        let filename = generate_unique_filename("episode one.mp3");

        assert!(filename.ends_with(".mp3"));
        assert!(!filename.contains("episode one"));
    }

    #[test]
    fn unique_filenames_do_not_collide() {
        assert_ne!(
            generate_unique_filename("a.wav"),
            generate_unique_filename("a.wav")
        );
    }

    #[test]
    fn file_format_is_the_lowercased_extension() {
        assert_eq!(file_format("Episode.MP3"), Some("mp3".to_string()));
        assert_eq!(file_format("noextension"), None);
    }

    #[tokio::test]
    async fn stores_bytes_under_the_upload_dir() {
        let dir = tempfile::tempdir().unwrap();
        let upload_dir = dir.path().to_string_lossy().into_owned();

        let path = store_audio_file(&upload_dir, "abc.mp3", b"audio bytes")
            .await
            .unwrap();

        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"audio bytes");
    }
}
