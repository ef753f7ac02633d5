pub mod diary;
pub mod photos;
pub mod progress;

pub use diary::{
    day_totals, manual_entry, progress_against, quick_entry, resolve_kcal, MealInput, Progress,
};
pub use photos::{PHOTO_EXTENSIONS, photo_key, photos_by_month, store_photo};
pub use progress::{
    measurement_deltas, new_checkin, new_fasting, new_measurement, weight_trend,
    MeasurementDelta, WeightTrend,
};
