pub mod listings;
pub mod overlays;
