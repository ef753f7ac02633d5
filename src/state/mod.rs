mod manager;
mod persistence;

pub use manager::{
    JournalManager, RECENT_CHECKINS, RECENT_FASTING, RECENT_MEASUREMENTS, RECENT_PLANS,
};
pub use persistence::{load_journal, save_journal, Journal};
