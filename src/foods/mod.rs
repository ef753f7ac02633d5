pub mod lookup;
pub mod table;

pub use lookup::lookup_per_100g;
pub use table::{food_names, OFFLINE_FOODS};
