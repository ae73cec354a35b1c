pub mod entities;
pub mod requests;

pub use entities::{Subject, SubjectDetail};
