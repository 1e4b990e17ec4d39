//! Source implementations.
//!
//! - [`ComickSource`] - the Comick JSON API, one instance per content language

pub mod comick;

pub use comick::ComickSource;
