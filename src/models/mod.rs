//! Core domain types.

mod record;
mod timestamp;
mod window;

pub use record::Record;
pub use timestamp::Timestamp;
pub use window::TimeWindow;
