pub mod error;
pub mod key_index;
pub mod localization;
pub mod performance;
pub mod pipeline;
pub mod tags;
