//! Gem Cascade (workspace facade crate).
//!
//! The engine, shared types and leaderboard store live in dedicated crates
//! under `crates/`; this package re-exports them as `gem_cascade::{core, types, store}`
//! and adds the timed game session and the paced move driver used by the binary.

pub use gem_cascade_core as core;
pub use gem_cascade_store as store;
pub use gem_cascade_types as types;

pub mod driver;
pub mod session;
