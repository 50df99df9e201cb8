//! Nested migration pass for a customer's wardrobe.

use std::sync::Arc;

use legacy_api::{LegacyApi, Session};
use legacy_migration_repository::ClothingRepository;
use legacy_migration_shared::types::{IdPair, NewClothingItem};
use tracing::warn;

use crate::errors::MigratorError;

/// Copies the clothing items of one customer at a time.
///
/// This is not a scheduled pass of its own: the legacy API only exposes
/// wardrobes per customer, so [`super::CustomersMigrator`] invokes it once
/// per migrated customer with that customer's [`IdPair`].
pub struct ClothesMigrator {
    api: Arc<dyn LegacyApi>,
    clothing: Arc<dyn ClothingRepository>,
}

impl ClothesMigrator {
    /// Creates a new `ClothesMigrator` instance.
    pub fn new(api: Arc<dyn LegacyApi>, clothing: Arc<dyn ClothingRepository>) -> Self {
        Self { api, clothing }
    }

    /// Migrates every clothing item of the given customer.
    ///
    /// Items are fetched under the customer's legacy id and stored under
    /// the customer's new id.
    pub async fn migrate_for_customer(
        &self,
        session: &Session,
        customer: IdPair,
    ) -> Result<(), MigratorError> {
        let items = self.api.customer_clothes(session, customer.old).await?;
        for item in items {
            let stored = self
                .clothing
                .add(&NewClothingItem {
                    legacy_id: Some(item.id),
                    kind: item.kind,
                    customer_id: customer.new,
                })
                .await?;

            self.copy_image(
                session,
                IdPair {
                    old: item.id,
                    new: stored.id,
                },
            )
            .await;
        }
        Ok(())
    }

    /// Copies the item picture. Image failures only cost the asset, never
    /// the already inserted item row.
    async fn copy_image(&self, session: &Session, ids: IdPair) {
        let bytes = match self.api.clothing_image(session, ids.old).await {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(item = ids.old, error = %error, "skipping clothing image");
                return;
            }
        };

        let filename = format!("clothe_{}", ids.new);
        if let Err(error) = self.clothing.attach_image(ids.new, bytes, &filename).await {
            warn!(item = ids.old, error = %error, "failed to store clothing image");
        }
    }
}
