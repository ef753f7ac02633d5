use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::info;
use uuid::Uuid;

use crate::error::{CaloriaError, Result};
use crate::models::ProgressPhoto;

/// Image types accepted for progress photos.
pub const PHOTO_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Month folder and stored file name for a photo taken at `now`.
///
/// Names become `{YYYYMMDD_HHMMSS}-{name}`, lowercased with spaces as `_`.
pub fn photo_key(original_name: &str, now: NaiveDateTime) -> (String, String) {
    let month = now.format("%Y-%m").to_string();
    let name = format!("{}-{}", now.format("%Y%m%d_%H%M%S"), original_name)
        .replace(' ', "_")
        .to_lowercase();
    (month, name)
}

/// Copy `source` into `photos_dir/{YYYY-MM}/` and describe the stored copy.
///
/// Existing files are never overwritten.
pub fn store_photo(source: &Path, photos_dir: &Path, now: NaiveDateTime) -> Result<ProgressPhoto> {
    let original_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            CaloriaError::InvalidInput(format!("not a file name: {}", source.display()))
        })?;
    let extension = source
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !PHOTO_EXTENSIONS.contains(&extension.as_str()) {
        return Err(CaloriaError::InvalidInput(format!(
            "{} is not a PNG or JPEG image",
            source.display()
        )));
    }

    let (month, file_name) = photo_key(original_name, now);
    let dir = photos_dir.join(&month);
    fs::create_dir_all(&dir)?;
    let path: PathBuf = dir.join(&file_name);
    if path.exists() {
        return Err(CaloriaError::InvalidInput(format!(
            "{} already exists",
            path.display()
        )));
    }
    fs::copy(source, &path)?;
    info!(path = %path.display(), "Stored progress photo");

    Ok(ProgressPhoto {
        id: Uuid::new_v4(),
        month,
        file_name,
        path,
        created_at: now,
    })
}

/// Photos grouped by month (oldest month first), names sorted within each.
pub fn photos_by_month(photos: &[ProgressPhoto]) -> BTreeMap<&str, Vec<&ProgressPhoto>> {
    let mut groups: BTreeMap<&str, Vec<&ProgressPhoto>> = BTreeMap::new();
    for photo in photos {
        groups.entry(photo.month.as_str()).or_default().push(photo);
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at(m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, m, d)
            .unwrap()
            .and_hms_opt(h, 15, 30)
            .unwrap()
    }

    #[test]
    fn test_photo_key() {
        let (month, name) = photo_key("Front View.JPG", at(3, 9, 8));
        assert_eq!(month, "2025-03");
        assert_eq!(name, "20250309_081530-front_view.jpg");
    }

    #[test]
    fn test_store_photo_copies_into_month_folder() {
        let src_dir = TempDir::new().unwrap();
        let photos_dir = TempDir::new().unwrap();
        let source = src_dir.path().join("side.png");
        fs::write(&source, b"png bytes").unwrap();

        let photo = store_photo(&source, photos_dir.path(), at(4, 1, 7)).unwrap();
        assert_eq!(photo.month, "2025-04");
        assert_eq!(
            photo.path,
            photos_dir.path().join("2025-04").join("20250401_071530-side.png")
        );
        assert_eq!(fs::read(&photo.path).unwrap(), b"png bytes");

        // Same second, same name: refused
        assert!(store_photo(&source, photos_dir.path(), at(4, 1, 7)).is_err());
    }

    #[test]
    fn test_store_photo_rejects_other_types() {
        let src_dir = TempDir::new().unwrap();
        let source = src_dir.path().join("notes.txt");
        fs::write(&source, b"x").unwrap();
        let err = store_photo(&source, src_dir.path(), at(4, 1, 7)).unwrap_err();
        assert!(matches!(err, CaloriaError::InvalidInput(_)));
    }

    #[test]
    fn test_photos_by_month() {
        let photo = |month: &str, name: &str| ProgressPhoto {
            id: Uuid::new_v4(),
            month: month.to_string(),
            file_name: name.to_string(),
            path: PathBuf::from(name),
            created_at: at(1, 1, 0),
        };
        let photos = vec![
            photo("2025-05", "b.png"),
            photo("2025-04", "x.png"),
            photo("2025-05", "a.png"),
        ];

        let groups = photos_by_month(&photos);
        let months: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(months, vec!["2025-04", "2025-05"]);
        let may: Vec<&str> = groups["2025-05"].iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(may, vec!["a.png", "b.png"]);
    }
}
