//! # Base types for gridchess
//!
//! This is an auxiliary crate for `gridchess`, holding the board vocabulary:
//! square coordinates, colors, piece kinds, per-piece state records, and the
//! square mask used as the result type of move queries.
//!
//! Normally you don't want to use this crate directly; use `gridchess`
//! instead, which re-exports everything from here.

pub mod geometry;
pub mod mask;
pub mod types;
