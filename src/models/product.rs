//! Remote product data

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Product fields shown next to a QR code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductSummary {
    pub title: String,
    /// URL of the first media preview image
    pub image_url: Option<String>,
    pub image_alt: Option<String>,
}
