//! # Base types for janggi
//!
//! This is an auxiliary crate for `janggi`, which contains the core value types and the
//! board geometry. It was split from the main crate, so everything declared here can be
//! used in the build script for `janggi`.
//!
//! Normally you don't want to use this crate directly. Use `janggi` instead.

pub mod geometry;
pub mod squareset;
pub mod types;
