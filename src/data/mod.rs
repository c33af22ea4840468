pub mod coin;
pub mod series;
pub mod timeframe;

pub use coin::{strip_html, CoinDetail, CoinLinks, CoinSummary, MarketMetrics, SearchResult};
pub use series::{PricePoint, PriceSeries};
pub use timeframe::{timeframe_params, LabelStyle, Timeframe};
