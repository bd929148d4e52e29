//! Public endpoints hit by scanned codes

use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    services::qr_codes::SCAN_NOT_FOUND,
};

/// Printable QR code
#[derive(Serialize, ToSchema)]
pub struct PublicQrCode {
    pub title: String,
    /// PNG data URI
    pub image: String,
}

/// Count a scan and redirect to the product or cart
#[utoipa::path(
    get,
    path = "/qrcodes/{id}/scan",
    tag = "public",
    params(("id" = String, Path, description = "QR code ID")),
    responses(
        (status = 307, description = "Redirect to the destination"),
        (status = 404, description = "QR code not found")
    )
)]
pub async fn scan_qr_code(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    let id: i32 = id
        .parse()
        .map_err(|_| AppError::NotFound(SCAN_NOT_FOUND.to_string()))?;

    let url = state.services.qr_codes.scan(id).await?;
    Ok(Redirect::temporary(&url))
}

/// Title and image of a QR code
#[utoipa::path(
    get,
    path = "/qrcodes/{id}",
    tag = "public",
    params(("id" = i32, Path, description = "QR code ID")),
    responses(
        (status = 200, description = "QR code", body = PublicQrCode),
        (status = 404, description = "QR code not found")
    )
)]
pub async fn public_qr_code(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<PublicQrCode>> {
    let id: i32 = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("QR code {} not found", id)))?;

    let (title, image) = state.services.qr_codes.public_code(id).await?;
    Ok(Json(PublicQrCode { title, image }))
}
