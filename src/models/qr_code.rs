//! QR code model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Where a scan sends the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    /// Product detail page
    Product,
    /// Cart with one unit of the linked variant
    Cart,
}

impl Destination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Destination::Product => "product",
            Destination::Cart => "cart",
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Destination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product" => Ok(Destination::Product),
            "cart" => Ok(Destination::Cart),
            _ => Err(format!("Invalid destination: {}", s)),
        }
    }
}

// Stored as lowercase text
impl sqlx::Type<Postgres> for Destination {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for Destination {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Destination {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

/// Persisted QR code record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct QrCode {
    pub id: i32,
    /// Owning shop domain, e.g. `my-shop.myshopify.com`
    pub shop: String,
    pub title: String,
    /// Product global id
    pub product_id: String,
    pub product_handle: String,
    /// Variant global id, `gid://shopify/ProductVariant/<n>`
    pub product_variant_id: String,
    pub destination: Destination,
    pub scans: i32,
    pub created_at: DateTime<Utc>,
}

/// Validated record contents written by create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCodeInput {
    pub title: String,
    pub product_id: String,
    pub product_handle: String,
    pub product_variant_id: String,
    pub destination: Destination,
}

/// Form submission for creating, updating or deleting a QR code
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct QrCodeDraft {
    /// `delete` removes the record, anything else saves it
    pub action: Option<String>,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Product is required"))]
    pub product_id: String,
    pub product_variant_id: String,
    pub product_handle: String,
    #[validate(custom(function = "validate_destination"))]
    pub destination: String,
}

impl QrCodeDraft {
    pub fn is_delete(&self) -> bool {
        self.action.as_deref() == Some("delete")
    }
}

fn validate_destination(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() {
        return Ok(());
    }
    let mut err = ValidationError::new("destination");
    err.message = Some("Destination is required".into());
    Err(err)
}

/// QR code joined with live product data and its rendered image
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EnrichedQrCode {
    #[serde(flatten)]
    pub qr_code: QrCode,
    /// The linked product no longer exists upstream
    pub product_deleted: bool,
    pub product_title: Option<String>,
    pub product_image: Option<String>,
    pub product_alt: Option<String>,
    pub destination_url: String,
    /// PNG data URI
    pub image: String,
}

/// Snapshot the edit form starts from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct QrCodeForm {
    pub title: String,
    pub product_id: Option<String>,
    pub product_variant_id: Option<String>,
    pub product_handle: Option<String>,
    pub product_title: Option<String>,
    pub product_image: Option<String>,
    pub product_alt: Option<String>,
    pub destination: Destination,
}

impl Default for QrCodeForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            product_id: None,
            product_variant_id: None,
            product_handle: None,
            product_title: None,
            product_image: None,
            product_alt: None,
            destination: Destination::Product,
        }
    }
}

impl From<&EnrichedQrCode> for QrCodeForm {
    fn from(view: &EnrichedQrCode) -> Self {
        Self {
            title: view.qr_code.title.clone(),
            product_id: Some(view.qr_code.product_id.clone()),
            product_variant_id: Some(view.qr_code.product_variant_id.clone()),
            product_handle: Some(view.qr_code.product_handle.clone()),
            product_title: view.product_title.clone(),
            product_image: view.product_image.clone(),
            product_alt: view.product_alt.clone(),
            destination: view.qr_code.destination,
        }
    }
}
