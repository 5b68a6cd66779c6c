//! Shared catalog types, taxonomy resolution, ranking and highlighting for the
//! script catalog browser.
//!
//! Everything in this crate is pure: records are borrowed read-only, no state is
//! retained between calls, and every lookup that can miss returns an `Option`
//! instead of failing.

pub mod error;
pub mod filtering;
pub mod highlight;
pub mod normalization;
pub mod ranking;
pub mod taxonomy;
pub mod types;
