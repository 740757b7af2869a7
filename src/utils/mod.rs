//! Utility modules for Lyriverse

pub mod hashing;
pub mod html;
