//! Makerspace domain entities.

pub mod model;
pub mod profile;
pub mod status;

pub use model::{ActiveMakerspace, MakerspaceRecord, PendingMakerspace};
pub use profile::{MakerspaceProfile, Mentor, WEEKDAYS, WeeklyTimings};
pub use status::MakerspaceStatus;
