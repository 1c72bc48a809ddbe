//! Handle interaction policies.

pub mod collision;

pub use collision::{CollisionPolicy, Bounds};
