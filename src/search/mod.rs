//! Debounced coin search shared by the navigation dropdown and the search page.

pub mod controller;
pub mod debounce;

pub use controller::{SearchController, SearchOptions, SearchState};
pub use debounce::Debouncer;
