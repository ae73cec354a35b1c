pub mod calculation;
pub mod entities;
pub mod requests;
pub mod responses;

pub use calculation::{compute_percentage, gpa_from_percentages, letter_grade, performance_band};
pub use entities::{Grade, GradeType};
