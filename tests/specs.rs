//! Behavioral specifications for the nudge reminder engine.
//!
//! These tests exercise the public crate surfaces end to end: engine,
//! storage, and adapters wired together the way the daemon wires them,
//! driven by a fake clock.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/scenario.rs"]
mod scenario;

#[path = "specs/bridging.rs"]
mod bridging;

#[path = "specs/restart.rs"]
mod restart;
