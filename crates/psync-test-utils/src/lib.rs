//! Shared test utilities for the psync workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: low-level git CLI helpers that panic on failure
//! - [`remote`]: [`remote::RemoteFixture`], a bare origin with two clones

pub mod git;
pub mod remote;
