//! src/view/icons.rs
//! ============================================================================
//! # Result List Icons (Nerd Fonts)
//!
//! Nerd Font glyphs used by the overlay components. Terminals without a
//! patched font render these as blank boxes, nothing breaks.

pub const FOLDER_ICON: &str = "";
pub const FILE_ICON: &str = "";
