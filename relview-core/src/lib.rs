//! Relview Core
//!
//! Core types and abstractions for the Relview release dashboard.
//!
//! This crate contains:
//! - Domain types: Pipelines, resolved runs, build timelines and released versions
//! - DTOs: Upstream Azure DevOps payloads and the server's HTTP shapes

pub mod domain;
pub mod dto;
