use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{
    Checkin, DiaryEntry, FastingLog, Measurement, Profile, ProgressPhoto, SavedPlan, Subscription,
};

/// Everything the app keeps for one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Journal {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub plans: Vec<SavedPlan>,
    #[serde(default)]
    pub diary: Vec<DiaryEntry>,
    #[serde(default)]
    pub checkins: Vec<Checkin>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
    #[serde(default)]
    pub fasting: Vec<FastingLog>,
    #[serde(default)]
    pub photos: Vec<ProgressPhoto>,
    #[serde(default)]
    pub subscription: Option<Subscription>,
}

/// Load the journal from a JSON file.
///
/// A missing file yields an empty journal.
pub fn load_journal<P: AsRef<Path>>(path: P) -> Result<Journal> {
    let path = path.as_ref();
    if !path.exists() {
        info!(path = %path.display(), "Journal file not found, starting empty");
        return Ok(Journal::default());
    }

    let content = fs::read_to_string(path)?;
    let journal: Journal = serde_json::from_str(&content)?;
    debug!(
        path = %path.display(),
        diary = journal.diary.len(),
        checkins = journal.checkins.len(),
        "Loaded journal"
    );
    Ok(journal)
}

/// Save the journal to a JSON file.
pub fn save_journal<P: AsRef<Path>>(path: P, journal: &Journal) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(journal)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), "Saved journal");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_missing_file_is_empty_journal() {
        let dir = TempDir::new().unwrap();
        let journal = load_journal(dir.path().join("nope.json")).unwrap();
        assert_eq!(journal, Journal::default());
    }

    #[test]
    fn test_partial_file_loads_with_defaults() {
        let json = r#"{"profile": {"weight_kg": 72.5, "onboarding_done": true}}"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let journal = load_journal(file.path()).unwrap();
        let profile = journal.profile.unwrap();
        assert_eq!(profile.weight_kg, Some(72.5));
        assert!(profile.onboarding_done);
        assert!(journal.diary.is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let journal = Journal {
            profile: Some(Profile {
                full_name: Some("Ana".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let out_file = NamedTempFile::new().unwrap();
        save_journal(out_file.path(), &journal).unwrap();

        let reloaded = load_journal(out_file.path()).unwrap();
        assert_eq!(reloaded, journal);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        assert!(load_journal(file.path()).is_err());
    }
}
