pub mod reviews;

pub use reviews::{ReviewService, ReviewSubmission};
