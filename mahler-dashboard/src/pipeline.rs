//! End-to-end dashboard run.
//!
//! Single pass:
//! 1. Build the market snapshot (quote failures become missing fields)
//! 2. Fetch filtered headlines (failures become an empty list)
//! 3. Score the snapshot
//! 4. Package everything as a `DashboardReport`

use chrono::NaiveDate;
use tracing::info;

use crate::config::DashboardConfig;
use crate::data::MarketDataSource;
use crate::regime::RiskScorer;
use crate::report::DashboardReport;
use crate::snapshot::SnapshotBuilder;

/// Dashboard pipeline over a market data source.
pub struct Dashboard<S> {
    builder: SnapshotBuilder<S>,
    scorer: RiskScorer,
    keywords: Vec<String>,
}

impl<S: MarketDataSource> Dashboard<S> {
    pub fn new(source: S, config: &DashboardConfig) -> Self {
        Self {
            builder: SnapshotBuilder::new(source),
            scorer: RiskScorer::new(config.scoring.clone()),
            keywords: config.news.keywords.clone(),
        }
    }

    /// Run once for `today`. Always produces a report.
    pub async fn run(&self, today: NaiveDate) -> DashboardReport {
        let snapshot = self.builder.build(today).await;
        let headlines = self.builder.source().fetch_headlines(&self.keywords).await;
        let assessment = self.scorer.score(&snapshot);

        info!(
            "Risk score {} ({}) from {} signal(s), {} headline(s)",
            assessment.score,
            assessment.classification,
            assessment.evaluated(),
            headlines.len()
        );

        DashboardReport::new(&snapshot, &assessment, headlines)
    }
}
