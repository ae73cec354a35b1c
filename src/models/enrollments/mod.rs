pub mod entities;
pub mod policy;
pub mod responses;

pub use entities::{EnrolledSubject, Enrollment};
pub use policy::{EnrollmentOutcome, EnrollmentRejection, UnenrollmentOutcome, check_enrollment};
