#![forbid(unsafe_code)]

//! Core: geometry, gesture input, decay animation, and two-way value bindings.

pub mod animation;
pub mod binding;
pub mod event;
pub mod geometry;
