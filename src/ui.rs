//! Presentation helpers shared by every screen

pub mod theme;
