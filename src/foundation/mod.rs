//! Shared primitives: geometry and color types, errors, random sources.

pub mod core;
pub mod error;
pub mod math;
