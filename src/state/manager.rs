use chrono::{NaiveDate, NaiveDateTime};
use tracing::info;
use uuid::Uuid;

use crate::error::{CaloriaError, Result};
use crate::models::{
    Checkin, DiaryEntry, FastingLog, Measurement, PlanResult, Profile, ProgressPhoto, SavedPlan,
    Subscription,
};
use crate::state::persistence::Journal;

/// Number of saved plans shown in listings.
pub const RECENT_PLANS: usize = 10;

/// Number of check-ins shown in listings.
pub const RECENT_CHECKINS: usize = 20;

/// Number of measurements shown in listings.
pub const RECENT_MEASUREMENTS: usize = 12;

/// Number of fasting windows shown in listings.
pub const RECENT_FASTING: usize = 10;

/// Manages the profile, plans and time series of one user.
pub struct JournalManager {
    journal: Journal,
}

impl JournalManager {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.journal.profile.as_ref()
    }

    /// Profile that finished onboarding, or `ProfileMissing`.
    pub fn onboarded_profile(&self) -> Result<&Profile> {
        self.profile()
            .filter(|p| p.onboarding_done)
            .ok_or(CaloriaError::ProfileMissing)
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.journal.profile = Some(profile);
    }

    /// Keep a plan; the newest plan is the active target.
    pub fn save_plan(&mut self, plan: SavedPlan) {
        info!(target_kcal = plan.result.target_kcal, "Saved plan");
        self.journal.plans.push(plan);
    }

    /// Most recent plans, newest first.
    pub fn recent_plans(&self, limit: usize) -> Vec<&SavedPlan> {
        let mut plans: Vec<&SavedPlan> = self.journal.plans.iter().collect();
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        plans.truncate(limit);
        plans
    }

    /// Targets of the newest saved plan.
    pub fn active_plan(&self) -> Option<&PlanResult> {
        self.journal
            .plans
            .iter()
            .max_by_key(|p| p.created_at)
            .map(|p| &p.result)
    }

    pub fn add_diary_entry(&mut self, entry: DiaryEntry) {
        self.journal.diary.push(entry);
    }

    pub fn add_diary_entries(&mut self, entries: impl IntoIterator<Item = DiaryEntry>) -> usize {
        let before = self.journal.diary.len();
        self.journal.diary.extend(entries);
        self.journal.diary.len() - before
    }

    /// Entries for a date, oldest first.
    pub fn entries_for(&self, date: NaiveDate) -> Vec<&DiaryEntry> {
        let mut entries: Vec<&DiaryEntry> = self
            .journal
            .diary
            .iter()
            .filter(|e| e.ref_date == date)
            .collect();
        entries.sort_by_key(|e| e.created_at);
        entries
    }

    /// Delete a diary entry by id.
    pub fn delete_entry(&mut self, id: Uuid) -> Result<DiaryEntry> {
        let pos = self
            .journal
            .diary
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CaloriaError::EntryNotFound(id.to_string()))?;
        Ok(self.journal.diary.remove(pos))
    }

    pub fn add_checkin(&mut self, checkin: Checkin) {
        self.journal.checkins.push(checkin);
    }

    pub fn checkins(&self) -> &[Checkin] {
        &self.journal.checkins
    }

    /// Most recent check-ins by reference date, newest first.
    pub fn recent_checkins(&self, limit: usize) -> Vec<&Checkin> {
        let mut out: Vec<&Checkin> = self.journal.checkins.iter().collect();
        out.sort_by(|a, b| (b.ref_date, b.created_at).cmp(&(a.ref_date, a.created_at)));
        out.truncate(limit);
        out
    }

    pub fn add_measurement(&mut self, measurement: Measurement) {
        self.journal.measurements.push(measurement);
    }

    /// The latest `limit` measurements (any order).
    pub fn recent_measurements(&self, limit: usize) -> Vec<Measurement> {
        let mut out = self.journal.measurements.clone();
        out.sort_by(|a, b| (b.ref_date, b.created_at).cmp(&(a.ref_date, a.created_at)));
        out.truncate(limit);
        out
    }

    pub fn add_fasting(&mut self, log: FastingLog) {
        self.journal.fasting.push(log);
    }

    /// The newest fasting window without an end.
    pub fn open_fasting(&self) -> Option<&FastingLog> {
        self.journal
            .fasting
            .iter()
            .filter(|f| f.end.is_none())
            .max_by_key(|f| f.start)
    }

    /// Close the newest open fasting window.
    pub fn close_fasting(&mut self, end: NaiveDateTime) -> Result<&FastingLog> {
        let log = self
            .journal
            .fasting
            .iter_mut()
            .filter(|f| f.end.is_none())
            .max_by_key(|f| f.start)
            .ok_or_else(|| CaloriaError::EntryNotFound("open fasting window".to_string()))?;
        if end < log.start {
            return Err(CaloriaError::InvalidInput(
                "fasting end is before its start".to_string(),
            ));
        }
        log.end = Some(end);
        Ok(&*log)
    }

    /// Most recent fasting windows, newest first.
    pub fn recent_fasting(&self, limit: usize) -> Vec<&FastingLog> {
        let mut out: Vec<&FastingLog> = self.journal.fasting.iter().collect();
        out.sort_by(|a, b| b.start.cmp(&a.start));
        out.truncate(limit);
        out
    }

    pub fn add_photo(&mut self, photo: ProgressPhoto) {
        self.journal.photos.push(photo);
    }

    pub fn photos(&self) -> &[ProgressPhoto] {
        &self.journal.photos
    }

    pub fn subscription(&self) -> Option<&Subscription> {
        self.journal.subscription.as_ref()
    }

    pub fn set_subscription(&mut self, subscription: Subscription) {
        info!(start = %subscription.start, end = %subscription.end, "Set subscription");
        self.journal.subscription = Some(subscription);
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }
}
