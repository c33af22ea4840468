use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

/// One row of the market listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSummary {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub rank: Option<u32>,
    pub price: Option<Decimal>,
    pub market_cap: Option<Decimal>,
    pub total_volume: Option<Decimal>,
    pub change_24h: Option<Decimal>,
    pub image: String,
}

impl CoinSummary {
    pub fn ticker(&self) -> String {
        self.symbol.to_uppercase()
    }

    /// Case-insensitive match on name or symbol
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.symbol.to_lowercase().contains(&needle)
    }

    pub fn is_up(&self) -> bool {
        self.change_24h.map(|c| c >= Decimal::ZERO).unwrap_or(true)
    }
}

/// Extended market metrics shown on the detail page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketMetrics {
    pub total_volume: Option<Decimal>,
    pub ath: Option<Decimal>,
    pub ath_date: Option<DateTime<Utc>>,
    pub circulating_supply: Option<Decimal>,
    pub total_supply: Option<Decimal>,
    pub max_supply: Option<Decimal>,
    pub change_24h: Option<Decimal>,
    pub change_7d: Option<Decimal>,
    pub change_30d: Option<Decimal>,
    pub change_1y: Option<Decimal>,
}

/// External reference links for a coin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinLinks {
    pub homepage: Option<String>,
    pub explorers: Vec<String>,
    pub subreddit: Option<String>,
    pub github: Option<String>,
}

impl CoinLinks {
    /// `(label, url)` pairs in display order
    pub fn labeled(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Some(url) = &self.homepage {
            out.push(("Official Website".to_string(), url.clone()));
        }
        for (i, url) in self.explorers.iter().enumerate() {
            out.push((format!("Blockchain Explorer {}", i + 1), url.clone()));
        }
        if let Some(url) = &self.subreddit {
            out.push(("Reddit".to_string(), url.clone()));
        }
        if let Some(url) = &self.github {
            out.push(("GitHub".to_string(), url.clone()));
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDetail {
    pub summary: CoinSummary,
    pub description: String,
    pub market: MarketMetrics,
    pub links: CoinLinks,
}

/// A hit returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub thumb: String,
    pub rank: Option<u32>,
}

/// Reduce an HTML description to plain text.
///
/// The fragment is parsed as HTML, so entities are decoded exactly once.
/// `<br>` and the end of each `<p>` become line breaks.
pub fn strip_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    collect_text(fragment.root_element(), &mut out);
    out.trim().to_string()
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(el) = ElementRef::wrap(child) {
            match el.value().name() {
                "br" => out.push('\n'),
                "p" => {
                    collect_text(el, out);
                    out.push('\n');
                }
                _ => collect_text(el, out),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn coin(name: &str, symbol: &str) -> CoinSummary {
        CoinSummary {
            id: name.to_lowercase(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            rank: Some(1),
            price: Some(dec!(1)),
            market_cap: None,
            total_volume: None,
            change_24h: Some(dec!(-1.5)),
            image: String::new(),
        }
    }

    #[test]
    fn test_matches_name_or_symbol() {
        let btc = coin("Bitcoin", "btc");
        assert!(btc.matches("BIT"));
        assert!(btc.matches("Btc"));
        assert!(!btc.matches("eth"));
        assert!(!btc.is_up());
        assert_eq!(btc.ticker(), "BTC");
    }

    #[test]
    fn test_strip_html() {
        let html = r#"<a href="https://bitcoin.org">Bitcoin</a> is a &quot;coin&quot;.<br>Second line"#;
        assert_eq!(strip_html(html), "Bitcoin is a \"coin\".\nSecond line");
    }

    #[test]
    fn test_strip_html_paragraphs() {
        let html = "<p>First</p><p>Second <strong>bold</strong></p>";
        assert_eq!(strip_html(html), "First\nSecond bold");
    }

    #[test]
    fn test_strip_html_numeric_entities() {
        assert_eq!(strip_html("Bitcoin&#8217;s network"), "Bitcoin\u{2019}s network");
        assert_eq!(strip_html("fees &#x2013; low"), "fees \u{2013} low");
    }

    #[test]
    fn test_strip_html_decodes_once() {
        assert_eq!(strip_html("use &amp;lt;b&amp;gt; tags"), "use &lt;b&gt; tags");
    }

    #[test]
    fn test_strip_html_bare_angle_bracket() {
        assert_eq!(strip_html("1 < 2 and more"), "1 < 2 and more");
    }

    #[test]
    fn test_links_labeled_order() {
        let links = CoinLinks {
            homepage: Some("https://a".into()),
            explorers: vec!["https://e1".into(), "https://e2".into()],
            subreddit: None,
            github: Some("https://g".into()),
        };
        let labels: Vec<String> = links.labeled().into_iter().map(|(l, _)| l).collect();
        assert_eq!(
            labels,
            vec!["Official Website", "Blockchain Explorer 1", "Blockchain Explorer 2", "GitHub"]
        );
    }
}
