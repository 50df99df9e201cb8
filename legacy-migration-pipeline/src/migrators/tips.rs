//! Migration pass for coaching tips.

use std::sync::Arc;

use async_trait::async_trait;
use legacy_api::{LegacyApi, Session};
use legacy_migration_repository::TipRepository;
use legacy_migration_shared::types::NewTip;
use tracing::warn;

use super::{EntityKind, EntityMigrator, MigrationSummary};
use crate::errors::MigratorError;
use crate::progress::ProgressReporter;

/// Copies every coaching tip into the new store.
///
/// Tips are the one family the legacy API serves complete in the listing,
/// so there is no per record detail fetch and no reference to resolve.
pub struct TipsMigrator {
    api: Arc<dyn LegacyApi>,
    tips: Arc<dyn TipRepository>,
    progress: Arc<dyn ProgressReporter>,
}

impl TipsMigrator {
    /// Creates a new `TipsMigrator` instance.
    pub fn new(
        api: Arc<dyn LegacyApi>,
        tips: Arc<dyn TipRepository>,
        progress: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self {
            api,
            tips,
            progress,
        }
    }
}

#[async_trait]
impl EntityMigrator for TipsMigrator {
    fn entity(&self) -> EntityKind {
        EntityKind::Tips
    }

    async fn run(&self, session: &Session) -> Result<MigrationSummary, MigratorError> {
        let listed = self.api.tips(session).await?;
        let mut summary = MigrationSummary {
            total: listed.len(),
            ..Default::default()
        };

        let task = self.progress.start("tips", listed.len());
        for tip in listed {
            let result = self
                .tips
                .add(&NewTip {
                    title: tip.title.clone(),
                    tip: tip.tip,
                })
                .await;
            match result {
                Ok(_) => {
                    summary.migrated += 1;
                    self.progress.increment(&task);
                }
                Err(error) => {
                    warn!(tip = %tip.title, error = %error, "skipping tip");
                    summary.skipped += 1;
                }
            }
        }
        self.progress.complete(task);

        Ok(summary)
    }
}
