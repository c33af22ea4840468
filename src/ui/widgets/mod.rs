//! Reusable widgets shared by the views

pub mod coin_table;
pub mod search_bar;
pub mod stats;
pub mod status;
pub mod timeframe;

pub use coin_table::CoinTable;
pub use search_bar::{SearchBox, SearchDropdown};
pub use stats::StatsPanel;
pub use status::{NavBar, NoticeLine};
pub use timeframe::TimeframeSelector;
