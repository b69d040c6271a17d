pub mod prices;
pub mod thresholds;
