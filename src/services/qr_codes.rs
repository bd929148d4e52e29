//! QR code management, enrichment and scanning

use std::sync::Arc;

use futures::future::try_join_all;

use super::{destination::destination_url, products::ProductCatalog, qr_image::QrImageGenerator};
use crate::{
    error::{AppError, AppResult},
    models::{EnrichedQrCode, QrCode, QrCodeInput},
    repository::QrCodeStore,
};

pub const SCAN_NOT_FOUND: &str = "Could not find QR code destination";

#[derive(Clone)]
pub struct QrCodeService {
    store: Arc<dyn QrCodeStore>,
    catalog: Arc<dyn ProductCatalog>,
    images: QrImageGenerator,
}

impl QrCodeService {
    pub fn new(
        store: Arc<dyn QrCodeStore>,
        catalog: Arc<dyn ProductCatalog>,
        images: QrImageGenerator,
    ) -> Self {
        Self {
            store,
            catalog,
            images,
        }
    }

    /// Enriched view of one record, `None` if it does not exist
    pub async fn get_enriched(&self, id: i32) -> AppResult<Option<EnrichedQrCode>> {
        match self.store.find_by_id(id).await? {
            Some(qr_code) => self.enrich(qr_code).await.map(Some),
            None => Ok(None),
        }
    }

    /// Enriched record owned by `shop`
    pub async fn get_for_shop(&self, shop: &str, id: i32) -> AppResult<EnrichedQrCode> {
        let qr_code = self.find_owned(shop, id).await?;
        self.enrich(qr_code).await
    }

    /// Enriched records of a shop, newest first
    pub async fn list_enriched(&self, shop: &str) -> AppResult<Vec<EnrichedQrCode>> {
        let qr_codes = self.store.list_by_shop(shop).await?;
        if qr_codes.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!("Enriching {} QR codes for {}", qr_codes.len(), shop);
        try_join_all(qr_codes.into_iter().map(|qr_code| self.enrich(qr_code))).await
    }

    /// Join a record with its product and rendered image.
    /// A product missing upstream marks the view as deleted instead of failing.
    pub async fn enrich(&self, qr_code: QrCode) -> AppResult<EnrichedQrCode> {
        let destination_url = destination_url(&qr_code)?;

        let image = self.render_image(qr_code.id);
        let product = self.catalog.product(&qr_code.shop, &qr_code.product_id);

        let (image, product) = tokio::try_join!(image, product)?;

        if product.is_none() {
            tracing::info!(
                "QR code {} links to missing product {}",
                qr_code.id,
                qr_code.product_id
            );
        }

        Ok(EnrichedQrCode {
            product_deleted: product.is_none(),
            product_title: product.as_ref().map(|p| p.title.clone()),
            product_image: product.as_ref().and_then(|p| p.image_url.clone()),
            product_alt: product.and_then(|p| p.image_alt),
            destination_url,
            image,
            qr_code,
        })
    }

    /// Create (`id == None`) or fully replace a record of `shop`
    pub async fn save(&self, shop: &str, id: Option<i32>, input: &QrCodeInput) -> AppResult<QrCode> {
        match id {
            None => {
                let created = self.store.create(shop, input).await?;
                tracing::info!("Created QR code {} for {}", created.id, shop);
                Ok(created)
            }
            Some(id) => {
                self.find_owned(shop, id).await?;
                let updated = self.store.update(id, input).await?;
                tracing::info!("Updated QR code {} for {}", id, shop);
                Ok(updated)
            }
        }
    }

    pub async fn delete(&self, shop: &str, id: i32) -> AppResult<()> {
        self.find_owned(shop, id).await?;
        self.store.delete(id).await?;
        tracing::info!("Deleted QR code {} for {}", id, shop);
        Ok(())
    }

    /// Count a scan and return where to send the customer
    pub async fn scan(&self, id: i32) -> AppResult<String> {
        let qr_code = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(SCAN_NOT_FOUND.to_string()))?;

        let url = destination_url(&qr_code)?;

        let counted = self
            .store
            .increment_scans(id)
            .await?
            .ok_or_else(|| AppError::NotFound(SCAN_NOT_FOUND.to_string()))?;

        tracing::info!("QR code {} scanned ({} total)", id, counted.scans);
        Ok(url)
    }

    /// Title and image for the public printable page
    pub async fn public_code(&self, id: i32) -> AppResult<(String, String)> {
        let qr_code = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("QR code {} not found", id)))?;
        let image = self.render_image(qr_code.id).await?;
        Ok((qr_code.title, image))
    }

    /// PNG encoding is CPU bound, keep it off the async workers
    async fn render_image(&self, id: i32) -> AppResult<String> {
        let images = self.images.clone();
        tokio::task::spawn_blocking(move || images.generate(id))
            .await
            .map_err(|e| AppError::Internal(format!("QR image task failed: {}", e)))?
    }

    async fn find_owned(&self, shop: &str, id: i32) -> AppResult<QrCode> {
        self.store
            .find_by_id(id)
            .await?
            .filter(|qr_code| qr_code.shop == shop)
            .ok_or_else(|| AppError::NotFound(format!("QR code {} not found", id)))
    }
}
