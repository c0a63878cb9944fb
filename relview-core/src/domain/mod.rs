//! Core domain types
//!
//! This module contains the core domain structures used across Relview crates.
//! These types are shared between the server (which resolves them from the
//! upstream pipeline API) and the client/CLI (which display them).

pub mod environment;
pub mod pipeline;
pub mod release;
pub mod run;
pub mod timeline;
