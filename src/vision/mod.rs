pub mod client;
pub mod estimate;
pub mod parse;

pub use client::{image_source, FoodDetector};
pub use estimate::{estimate_entries, estimate_items, EstimatedItem};
pub use parse::{parse_detection_content, DetectedFood};
