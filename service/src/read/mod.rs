//! Read models definitions.

pub mod listing;
pub mod location;
pub mod news;
pub mod settings;
pub mod user;
pub mod viewport;
