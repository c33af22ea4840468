use super::{step_cursor, CoinsRequest, Loaded, Remote};
use crate::data::CoinSummary;
use crate::freshness::RequestSequence;
use tracing::debug;

/// Landing page: the top coins by market cap
#[derive(Debug)]
pub struct HomePage {
    limit: u32,
    coins: Remote<Vec<CoinSummary>>,
    selected: usize,
    sequence: RequestSequence,
}

impl HomePage {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            coins: Remote::Idle,
            selected: 0,
            sequence: RequestSequence::new(),
        }
    }

    pub fn request(&mut self) -> CoinsRequest {
        self.coins = Remote::Loading;
        CoinsRequest {
            token: self.sequence.issue(),
            limit: self.limit,
        }
    }

    pub fn apply(&mut self, loaded: Loaded<Vec<CoinSummary>>) -> bool {
        if !self.sequence.is_current(loaded.token) {
            return false;
        }
        debug!("Home received {} coins", loaded.data.len());
        self.coins = if loaded.data.is_empty() {
            Remote::Unavailable
        } else {
            Remote::Ready(loaded.data)
        };
        self.selected = 0;
        true
    }

    pub fn coins(&self) -> &Remote<Vec<CoinSummary>> {
        &self.coins
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_coin(&self) -> Option<&CoinSummary> {
        self.coins.ready().and_then(|c| c.get(self.selected))
    }

    pub fn select_next(&mut self) {
        let len = self.coins.ready().map(Vec::len).unwrap_or(0);
        self.selected = step_cursor(self.selected, len, true);
    }

    pub fn select_prev(&mut self) {
        let len = self.coins.ready().map(Vec::len).unwrap_or(0);
        self.selected = step_cursor(self.selected, len, false);
    }
}
