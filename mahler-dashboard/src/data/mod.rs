pub mod news;
pub mod source;
pub mod types;
pub mod yahoo;

pub use news::{extract_headlines, filter_headlines, NewsError};
pub use source::{ExpectedMove, MarketDataSource, RateSpreads, SourceError, VolStructure};
pub use types::{DailyClose, Headline, OptionQuote, OptionType, OptionsChain};
pub use yahoo::{parse_latest_close, parse_options_chain, YahooClient};
