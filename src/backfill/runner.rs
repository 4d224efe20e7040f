use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::backfill::window::{HourlyWindows, Window};
use crate::backfill::worker::{self, ReferenceData, WindowCounts, WindowOutcome};
use crate::config::Config;
use crate::error::AppResult;
use crate::openweather::AirPollutionSource;

/// Totals across a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillSummary {
    pub windows: usize,
    pub committed: usize,
    pub failed: usize,
    pub entries: usize,
    pub readings_inserted: usize,
    pub values_inserted: usize,
}

impl BackfillSummary {
    fn record(&mut self, outcome: &WindowOutcome) {
        self.windows += 1;
        match outcome {
            WindowOutcome::Committed(counts) => {
                self.committed += 1;
                self.entries += counts.entries;
                self.readings_inserted += counts.readings_inserted;
                self.values_inserted += counts.values_inserted;
            }
            WindowOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Walks the configured date range one hour at a time, storing every window
/// in its own transaction.
pub struct BackfillRunner<S> {
    config: Config,
    db: DatabaseConnection,
    source: S,
}

impl<S: AirPollutionSource> BackfillRunner<S> {
    #[must_use]
    pub fn new(config: Config, db: DatabaseConnection, source: S) -> Self {
        Self { config, db, source }
    }

    /// Seed the location and components in a single transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any database operation fails.
    pub async fn seed(&self) -> AppResult<ReferenceData> {
        let txn = self.db.begin().await?;
        let reference = worker::seed_reference_data(&txn, &self.config).await?;
        txn.commit().await?;
        Ok(reference)
    }

    /// Run the full backfill.
    ///
    /// Only seeding errors are returned. Window failures are logged, rolled
    /// back and counted in the summary.
    ///
    /// # Errors
    ///
    /// Returns an error if seeding fails.
    pub async fn run(&self) -> AppResult<BackfillSummary> {
        let reference = self.seed().await?;

        tracing::info!(
            start = %self.config.start,
            end = %self.config.end,
            "Starting hourly backfill"
        );

        let mut summary = BackfillSummary::default();

        for window in HourlyWindows::new(self.config.start, self.config.end) {
            tracing::info!(start = %window.start, end = %window.end, "Fetching window");

            let outcome = self.backfill_window(&reference, &window).await;
            match &outcome {
                WindowOutcome::Committed(counts) => {
                    tracing::debug!(
                        start = %window.start,
                        entries = counts.entries,
                        readings = counts.readings_inserted,
                        values = counts.values_inserted,
                        "Window committed"
                    );
                }
                WindowOutcome::Failed { reason } => {
                    tracing::error!(
                        start = %window.start,
                        error = %reason,
                        "Failed to backfill window"
                    );
                }
            }
            summary.record(&outcome);
        }

        tracing::info!(
            windows = summary.windows,
            committed = summary.committed,
            failed = summary.failed,
            entries = summary.entries,
            readings = summary.readings_inserted,
            values = summary.values_inserted,
            "Backfill complete"
        );

        Ok(summary)
    }

    /// Fetch and store one window. Never fails: errors become
    /// `WindowOutcome::Failed` after the transaction is rolled back.
    pub async fn backfill_window(&self, reference: &ReferenceData, window: &Window) -> WindowOutcome {
        match self.try_backfill_window(reference, window).await {
            Ok(counts) => WindowOutcome::Committed(counts),
            Err(e) => WindowOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }

    async fn try_backfill_window(
        &self,
        reference: &ReferenceData,
        window: &Window,
    ) -> AppResult<WindowCounts> {
        let response = self.source.fetch_history(window).await?;

        let txn = self.db.begin().await?;
        match worker::process_window(&txn, reference, &self.config.location, &response).await {
            Ok(counts) => {
                txn.commit().await?;
                Ok(counts)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::warn!(
                        start = %window.start,
                        error = %rollback_err,
                        "Failed to roll back window"
                    );
                }
                Err(e)
            }
        }
    }
}
