//! Document models
//!
//! BSON document structures stored in the feedback database.

pub mod feedback;

pub use feedback::*;
