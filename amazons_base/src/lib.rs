//! # Base types for amazons
//!
//! This is an auxiliary crate for `amazons`, which contains plain value types: squares, cells, colors
//! and board sizes. It has no game logic.
//!
//! Normally you don't want to use this crate directly. Use `amazons` instead.

pub mod geometry;
pub mod types;
