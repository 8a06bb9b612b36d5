//! Data models for prompts

pub mod configuration;
pub mod message;
pub mod option;
pub mod spec;

pub use configuration::*;
pub use message::*;
pub use option::PickerOption;
pub use spec::*;
