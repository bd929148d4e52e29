//! Business logic services

pub mod destination;
pub mod products;
pub mod qr_codes;
pub mod qr_image;
pub mod validation;

use std::sync::Arc;

use crate::repository::QrCodeStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub qr_codes: qr_codes::QrCodeService,
}

impl Services {
    /// Create all services over the given store and catalog
    pub fn new(
        store: Arc<dyn QrCodeStore>,
        catalog: Arc<dyn products::ProductCatalog>,
        images: qr_image::QrImageGenerator,
    ) -> Self {
        Self {
            qr_codes: qr_codes::QrCodeService::new(store, catalog, images),
        }
    }
}
