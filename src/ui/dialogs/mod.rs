//! Modal overlays for the TUI

pub mod help;

pub use help::HelpOverlay;
