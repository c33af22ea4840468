use super::{step_cursor, CoinsRequest, Loaded, Remote};
use crate::data::CoinSummary;
use crate::freshness::RequestSequence;
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Sortable columns of the coin table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Rank,
    Price,
    Change24h,
    MarketCap,
    Volume,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Rank,
        SortKey::Price,
        SortKey::Change24h,
        SortKey::MarketCap,
        SortKey::Volume,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Rank => "Rank",
            SortKey::Price => "Price",
            SortKey::Change24h => "24h Change",
            SortKey::MarketCap => "Market Cap",
            SortKey::Volume => "Volume (24h)",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn value(self, coin: &CoinSummary) -> Option<Decimal> {
        match self {
            SortKey::Rank => coin.rank.map(Decimal::from),
            SortKey::Price => coin.price,
            SortKey::Change24h => coin.change_24h,
            SortKey::MarketCap => coin.market_cap,
            SortKey::Volume => coin.total_volume,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }

    fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Order two coins by `key`. Missing values go last in either direction.
fn compare_by(key: SortKey, direction: SortDirection, a: &CoinSummary, b: &CoinSummary) -> Ordering {
    match (key.value(a), key.value(b)) {
        (Some(x), Some(y)) => match direction {
            SortDirection::Ascending => x.cmp(&y),
            SortDirection::Descending => y.cmp(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Full market table with a local filter and column sorting
#[derive(Debug)]
pub struct ListPage {
    limit: u32,
    coins: Remote<Vec<CoinSummary>>,
    filter: String,
    sort_key: SortKey,
    direction: SortDirection,
    selected: usize,
    sequence: RequestSequence,
}

impl ListPage {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            coins: Remote::Idle,
            filter: String::new(),
            sort_key: SortKey::default(),
            direction: SortDirection::default(),
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

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_string();
        self.selected = 0;
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.selected = 0;
    }

    pub fn pop_filter_char(&mut self) {
        self.filter.pop();
        self.selected = 0;
    }

    pub fn sort(&self) -> (SortKey, SortDirection) {
        (self.sort_key, self.direction)
    }

    /// Sort by `key`; picking the current key again flips the direction
    pub fn sort_by(&mut self, key: SortKey) {
        if key == self.sort_key {
            self.direction = self.direction.flip();
        } else {
            self.sort_key = key;
            self.direction = SortDirection::Ascending;
        }
        self.selected = 0;
    }

    /// Move to the next sortable column, ascending
    pub fn cycle_sort(&mut self) {
        self.sort_by(self.sort_key.next());
    }

    /// Coins matching the filter, in the current sort order
    pub fn visible(&self) -> Vec<&CoinSummary> {
        let Some(coins) = self.coins.ready() else {
            return Vec::new();
        };
        let needle = self.filter.trim();
        let mut rows: Vec<&CoinSummary> = coins
            .iter()
            .filter(|c| needle.is_empty() || c.matches(needle))
            .collect();
        rows.sort_by(|a, b| compare_by(self.sort_key, self.direction, a, b));
        rows
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_coin(&self) -> Option<&CoinSummary> {
        self.visible().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        self.selected = step_cursor(self.selected, self.visible().len(), true);
    }

    pub fn select_prev(&mut self) {
        self.selected = step_cursor(self.selected, self.visible().len(), false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::coin;
    use rust_decimal_macros::dec;

    fn page() -> ListPage {
        let mut btc = coin("bitcoin", "Bitcoin", "btc", 1);
        btc.price = Some(dec!(43000));
        btc.change_24h = Some(dec!(1.5));
        let mut eth = coin("ethereum", "Ethereum", "eth", 2);
        eth.price = Some(dec!(2300));
        eth.change_24h = Some(dec!(-0.7));
        let mut usdt = coin("tether", "Tether", "usdt", 3);
        usdt.price = Some(dec!(1));
        let mut bch = coin("bitcoin-cash", "Bitcoin Cash", "bch", 4);
        bch.rank = None;
        bch.price = Some(dec!(240));
        bch.change_24h = Some(dec!(3.2));

        let mut list = ListPage::new(100);
        list.coins = Remote::Ready(vec![btc, eth, usdt, bch]);
        list
    }

    fn ids(list: &ListPage) -> Vec<&str> {
        list.visible().iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_default_sort_is_rank_ascending() {
        let list = page();
        assert_eq!(list.sort(), (SortKey::Rank, SortDirection::Ascending));
        assert_eq!(ids(&list), vec!["bitcoin", "ethereum", "tether", "bitcoin-cash"]);
    }

    #[test]
    fn test_same_key_toggles_direction() {
        let mut list = page();
        list.sort_by(SortKey::Price);
        assert_eq!(ids(&list), vec!["tether", "bitcoin-cash", "ethereum", "bitcoin"]);

        list.sort_by(SortKey::Price);
        assert_eq!(list.sort().1, SortDirection::Descending);
        assert_eq!(ids(&list), vec!["bitcoin", "ethereum", "bitcoin-cash", "tether"]);

        list.sort_by(SortKey::Price);
        assert_eq!(list.sort().1, SortDirection::Ascending);
    }

    #[test]
    fn test_new_key_starts_ascending() {
        let mut list = page();
        list.sort_by(SortKey::Price);
        list.sort_by(SortKey::Price);
        list.sort_by(SortKey::Change24h);
        assert_eq!(list.sort(), (SortKey::Change24h, SortDirection::Ascending));
    }

    #[test]
    fn test_missing_values_sort_last() {
        let mut list = page();
        list.sort_by(SortKey::Change24h);
        assert_eq!(ids(&list), vec!["ethereum", "bitcoin", "bitcoin-cash", "tether"]);
        list.sort_by(SortKey::Change24h);
        assert_eq!(ids(&list), vec!["bitcoin-cash", "bitcoin", "ethereum", "tether"]);

        list.sort_by(SortKey::Rank);
        list.sort_by(SortKey::Rank);
        assert_eq!(ids(&list), vec!["tether", "ethereum", "bitcoin", "bitcoin-cash"]);
    }

    #[test]
    fn test_filter_matches_name_or_symbol() {
        let mut list = page();
        list.set_filter("BIT");
        assert_eq!(ids(&list), vec!["bitcoin", "bitcoin-cash"]);
        list.set_filter("usdt");
        assert_eq!(ids(&list), vec!["tether"]);
        list.set_filter("nothing");
        assert!(list.visible().is_empty());
        assert!(list.selected_coin().is_none());
    }

    #[test]
    fn test_cycle_sort() {
        let mut list = page();
        list.cycle_sort();
        assert_eq!(list.sort(), (SortKey::Price, SortDirection::Ascending));
        for _ in 0..4 {
            list.cycle_sort();
        }
        assert_eq!(list.sort().0, SortKey::Rank);
    }

    #[test]
    fn test_selection_follows_visible_rows() {
        let mut list = page();
        list.set_filter("bit");
        list.select_next();
        assert_eq!(list.selected_coin().map(|c| c.id.as_str()), Some("bitcoin-cash"));
        list.select_next();
        assert_eq!(list.selected(), 0);
    }
}
