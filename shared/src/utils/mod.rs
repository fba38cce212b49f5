//! Utility functions shared by every crate

pub mod email;
pub mod phone;
