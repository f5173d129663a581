//! Question domain.
//!
//! - [`entities::Question`] — an immutable generated quiz question

pub mod entities;
