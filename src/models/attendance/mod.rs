pub mod entities;
pub mod requests;
pub mod responses;
pub mod summary;

pub use entities::{Attendance, AttendanceStatus};
pub use summary::AttendanceSummary;
