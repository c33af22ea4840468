//! Input state for the TUI
//!
//! Tracks the input mode (normal, text editing, help overlay), the current
//! route with its back stack, and the one-line notice.

/// Text field receiving keystrokes in editing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTarget {
    /// Search box in the navigation bar
    NavSearch,
    /// Filter on the coin list
    ListFilter,
    /// Query on the search page
    SearchPage,
}

/// Current input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing(TextTarget),
    /// Keybinding overlay is shown
    Help,
}

/// Screen currently displayed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Coins,
    Coin(String),
    Compare,
    Search(String),
}

impl Route {
    pub fn title(&self) -> &str {
        match self {
            Route::Home => "Home",
            Route::Coins => "Cryptocurrencies",
            Route::Coin(_) => "Details",
            Route::Compare => "Compare",
            Route::Search(_) => "Search",
        }
    }

    /// Tabs reachable with a number key
    pub fn tabs() -> [(char, &'static str); 4] {
        [
            ('1', "Home"),
            ('2', "Cryptocurrencies"),
            ('3', "Compare"),
            ('4', "Search"),
        ]
    }

    /// Shortcut of the tab this route belongs to, if any
    pub fn shortcut(&self) -> Option<char> {
        match self {
            Route::Home => Some('1'),
            Route::Coins => Some('2'),
            Route::Compare => Some('3'),
            Route::Search(_) => Some('4'),
            Route::Coin(_) => None,
        }
    }

    pub fn from_shortcut(c: char) -> Option<Self> {
        match c {
            '1' => Some(Route::Home),
            '2' => Some(Route::Coins),
            '3' => Some(Route::Compare),
            '4' => Some(Route::Search(String::new())),
            _ => None,
        }
    }
}

/// Complete input state
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub mode: InputMode,
    pub route: Route,
    history: Vec<Route>,
    notice: Option<String>,
}

impl InputState {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            ..Self::default()
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self.mode, InputMode::Normal)
    }

    pub fn is_editing(&self, target: TextTarget) -> bool {
        self.mode == InputMode::Editing(target)
    }

    pub fn is_help(&self) -> bool {
        matches!(self.mode, InputMode::Help)
    }

    pub fn show_help(&mut self) {
        self.mode = InputMode::Help;
    }

    pub fn start_editing(&mut self, target: TextTarget) {
        self.mode = InputMode::Editing(target);
    }

    /// Return to normal mode from editing or the help overlay
    pub fn close(&mut self) {
        self.mode = InputMode::Normal;
    }

    /// Go to `route`, remembering where we came from.
    ///
    /// Returns false if `route` is already displayed.
    pub fn navigate(&mut self, route: Route) -> bool {
        if route == self.route {
            return false;
        }
        let previous = std::mem::replace(&mut self.route, route);
        self.history.push(previous);
        self.mode = InputMode::Normal;
        true
    }

    /// Pop the back stack. Returns false when there is nowhere to go.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(route) => {
                self.route = route;
                self.mode = InputMode::Normal;
                true
            }
            None => false,
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}
