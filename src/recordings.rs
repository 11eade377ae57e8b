//! Voice recording storage
//!
//! Recordings are stored as individual files in a dedicated directory,
//! named so a row in the database and a file on disk can always be matched
//! by eye: `P<participant>_<timestamp>_<marker>_<word>.<ext>`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

/// Filesystem store for uploaded pronunciation recordings
#[derive(Debug, Clone)]
pub struct RecordingStore {
    dir: PathBuf,
}

impl RecordingStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Build the deterministic recording filename.
    ///
    /// Format: `P{participant:03}_{YYYYMMDD_HHMMSS_mmm}_{marker}_{word}.{ext}`
    /// with `P000` standing in for anonymous uploads. Millisecond resolution
    /// keeps any two uploads distinct in practice.
    pub fn filename(
        participant_id: Option<i64>,
        recorded_at: DateTime<Utc>,
        marker_id: &str,
        target_word: &str,
        extension: &str,
    ) -> String {
        let participant_prefix = match participant_id {
            Some(id) => format!("P{:03}", id),
            None => "P000".to_string(),
        };
        let timestamp = recorded_at.format("%Y%m%d_%H%M%S_%3f");
        format!(
            "{}_{}_{}_{}.{}",
            participant_prefix,
            timestamp,
            sanitize_component(marker_id),
            sanitize_component(target_word),
            sanitize_component(extension),
        )
    }

    /// Write the audio bytes under `filename`, returning the stored path.
    ///
    /// The write must succeed before any database row referencing the file
    /// is created; callers abort on error.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        let path = self.dir.join(filename);
        tokio::fs::write(&path, bytes).await?;
        info!(
            "Voice recording saved: {} ({:.1} KB)",
            filename,
            bytes.len() as f64 / 1024.0
        );
        Ok(path)
    }
}

/// Replace path separators and control characters so caller-supplied marker
/// ids and words cannot escape the recordings directory. Unicode letters
/// (diacritics in the Romanian target words) pass through unchanged.
fn sanitize_component(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26)
            .unwrap()
            .checked_add_signed(chrono::Duration::milliseconds(535))
            .unwrap()
    }

    #[test]
    fn test_filename_with_participant() {
        let name = RecordingStore::filename(Some(1), ts(), "CUP_ID_1", "cupă", "m4a");
        assert_eq!(name, "P001_20260314_150926_535_CUP_ID_1_cupă.m4a");
    }

    #[test]
    fn test_filename_anonymous_uses_sentinel() {
        let name = RecordingStore::filename(None, ts(), "CUP_ID_1", "cupă", "m4a");
        assert!(name.starts_with("P000_"));
    }

    #[test]
    fn test_filename_zero_pads_participant() {
        let name = RecordingStore::filename(Some(42), ts(), "APPLE_ID_2", "măr", "m4a");
        assert!(name.starts_with("P042_"));
    }

    #[test]
    fn test_filename_differs_per_millisecond() {
        let t1 = ts();
        let t2 = t1 + chrono::Duration::milliseconds(1);
        let a = RecordingStore::filename(Some(1), t1, "CUP_ID_1", "cupă", "m4a");
        let b = RecordingStore::filename(Some(1), t2, "CUP_ID_1", "cupă", "m4a");
        assert_ne!(a, b);
    }

    #[test]
    fn test_filename_differs_per_marker_and_word() {
        let t = ts();
        let a = RecordingStore::filename(Some(1), t, "CUP_ID_1", "cupă", "m4a");
        let b = RecordingStore::filename(Some(1), t, "APPLE_ID_2", "cupă", "m4a");
        let c = RecordingStore::filename(Some(1), t, "CUP_ID_1", "măr", "m4a");
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_sanitize_strips_path_separators() {
        let name = RecordingStore::filename(Some(1), ts(), "../etc", "pa/ră", "m4a");
        assert!(!name.contains('/'));
        assert!(!name.contains(".."));
    }

    #[tokio::test]
    async fn test_save_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordingStore::new(tmp.path().to_path_buf());
        let path = store.save("P001_test.m4a", b"fake audio").await.unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"fake audio");
    }
}
