pub mod config;
pub mod data;
pub mod pipeline;
pub mod regime;
pub mod report;
pub mod snapshot;

// Re-export commonly used types
pub use config::{ConfigError, DashboardConfig};
pub use data::{Headline, MarketDataSource, SourceError, YahooClient};
pub use pipeline::Dashboard;
pub use regime::{RiskAssessment, RiskClassification, RiskScorer};
pub use report::{ConsoleSink, DashboardReport, HtmlSink, JsonSink, ReportSink};
pub use snapshot::{MarketSnapshot, SnapshotBuilder, SnapshotField};
