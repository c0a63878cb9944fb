//! Data Transfer Objects
//!
//! This module contains the wire shapes Relview exchanges with the outside:
//! payloads returned by the upstream Azure DevOps API and the request/error
//! bodies of the Relview HTTP API.

pub mod api;
pub mod azure;
