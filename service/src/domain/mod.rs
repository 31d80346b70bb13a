//! Domain definitions.

pub mod lead;
pub mod listing;
pub mod location;
pub mod settlement;
pub mod user;

pub use self::lead::Lead;
