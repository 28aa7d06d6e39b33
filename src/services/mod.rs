//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! `generation` wraps the provider; `controller` owns one tool view's state
//! and submit flow; `session` groups the three controllers behind tab
//! selection; `history` records completed interactions. Route handlers stay
//! focused on protocol translation.

pub mod controller;
pub mod generation;
pub mod history;
pub mod session;
