pub mod charts;
pub mod dashboard;
pub mod predict;

pub use charts::{importance, performance};
pub use dashboard::dashboard;
pub use predict::predict;
