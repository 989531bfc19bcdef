pub mod geometry;
pub mod ids;
pub mod units;

pub use geometry::{Rect, Size};
pub use ids::RecordUrl;
pub use units::{PageSize, Unit};
