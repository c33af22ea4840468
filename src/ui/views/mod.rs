//! View modules for the TUI
//!
//! Each view renders the content area for one route.

pub mod compare;
pub mod details;
pub mod home;
pub mod list;
pub mod search;

pub use compare::CompareView;
pub use details::DetailsView;
pub use home::HomeView;
pub use list::ListView;
pub use search::SearchView;

use crate::pages::{ComparePage, DetailsPage, HomePage, ListPage, SearchPage};
use crate::ui::input::InputState;
use ratatui::{layout::Rect, Frame};

/// Shared state passed to views for rendering
pub struct ViewState<'a> {
    pub input: &'a InputState,
    pub home: &'a HomePage,
    pub list: &'a ListPage,
    pub details: &'a DetailsPage,
    pub compare: &'a ComparePage,
    pub search: &'a SearchPage,
}

/// Trait for renderable views
pub trait ViewRenderer {
    fn render(&self, f: &mut Frame, area: Rect, state: &ViewState);
}
