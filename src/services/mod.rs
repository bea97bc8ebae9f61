//! Side-effecting services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! The lobby engine is pure; anything that talks to the network lives here
//! so route handlers stay focused on protocol translation.

pub mod broadcast;
