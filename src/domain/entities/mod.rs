//! Core business entities.

mod link;

pub use link::{Link, NewLink};
