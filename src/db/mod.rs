//! Data access layer for the feedback store.

pub mod feedback;

pub use feedback::FeedbackStore;
