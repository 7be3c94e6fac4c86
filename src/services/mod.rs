//! Business services for the RFQ core

pub mod collector;
pub mod lifecycle;
pub mod notifications;
pub mod scoring;

pub use notifications::{LogNotifier, Notifier, RfqEvent};
