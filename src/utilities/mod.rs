// Utilities module
// Helper functions and tools

pub mod text;

pub use text::{center_text, clip_text};
