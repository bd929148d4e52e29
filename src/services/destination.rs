//! Scan destination resolution

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    error::{AppError, AppResult},
    models::{Destination, QrCode},
};

static VARIANT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/ProductVariant/([0-9]+)").expect("valid variant id pattern"));

/// Absolute URL a scan of this QR code redirects to
pub fn destination_url(qr_code: &QrCode) -> AppResult<String> {
    match qr_code.destination {
        Destination::Product => Ok(format!(
            "https://{}/products/{}",
            qr_code.shop, qr_code.product_handle
        )),
        Destination::Cart => {
            let variant_id = VARIANT_ID
                .captures(&qr_code.product_variant_id)
                .and_then(|caps| caps.get(1))
                .ok_or_else(|| {
                    AppError::InvalidReference(format!(
                        "QR code {} has invalid variant id {:?}",
                        qr_code.id, qr_code.product_variant_id
                    ))
                })?;
            Ok(format!(
                "https://{}/cart/{}:1",
                qr_code.shop,
                variant_id.as_str()
            ))
        }
    }
}
