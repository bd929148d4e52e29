//! Admin QR code endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Redirect,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{EnrichedQrCode, QrCodeDraft, QrCodeForm},
    services::validation::draft_to_input,
};

use super::ShopSession;

const LIST_TITLE_LENGTH: usize = 25;

/// Row of the QR code index page
#[derive(Serialize, ToSchema)]
pub struct QrCodeRow {
    pub id: i32,
    /// Title cut to fit the table
    pub title: String,
    pub product_title: Option<String>,
    pub product_image: Option<String>,
    pub product_alt: Option<String>,
    pub product_deleted: bool,
    pub destination_url: String,
    pub image: String,
    pub scans: i32,
    pub created_at: DateTime<Utc>,
    /// e.g. `Fri Jan 05 2024`
    pub created_on: String,
}

impl From<EnrichedQrCode> for QrCodeRow {
    fn from(view: EnrichedQrCode) -> Self {
        Self {
            id: view.qr_code.id,
            title: truncate(&view.qr_code.title, LIST_TITLE_LENGTH),
            product_title: view.product_title,
            product_image: view.product_image,
            product_alt: view.product_alt,
            product_deleted: view.product_deleted,
            destination_url: view.destination_url,
            image: view.image,
            scans: view.qr_code.scans,
            created_on: view.qr_code.created_at.format("%a %b %d %Y").to_string(),
            created_at: view.qr_code.created_at,
        }
    }
}

/// Edit page payload
#[derive(Serialize, ToSchema)]
pub struct QrCodeFormResponse {
    pub form: QrCodeForm,
    /// Absent for a new QR code
    pub qr_code: Option<EnrichedQrCode>,
}

fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(length).collect();
    cut.push('…');
    cut
}

/// `new` or a numeric id
fn parse_form_id(id: &str) -> AppResult<Option<i32>> {
    if id == "new" {
        return Ok(None);
    }
    id.parse()
        .map(Some)
        .map_err(|_| AppError::NotFound(format!("QR code {} not found", id)))
}

/// List the shop's QR codes
#[utoipa::path(
    get,
    path = "/api/qrcodes",
    tag = "qrcodes",
    security(("session_token" = [])),
    responses(
        (status = 200, description = "QR codes, newest first", body = Vec<QrCodeRow>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_qr_codes(
    State(state): State<crate::AppState>,
    ShopSession(shop): ShopSession,
) -> AppResult<Json<Vec<QrCodeRow>>> {
    let views = state.services.qr_codes.list_enriched(&shop).await?;
    Ok(Json(views.into_iter().map(QrCodeRow::from).collect()))
}

/// Load the edit form for a QR code, or a blank one for `new`
#[utoipa::path(
    get,
    path = "/api/qrcodes/{id}",
    tag = "qrcodes",
    security(("session_token" = [])),
    params(("id" = String, Path, description = "QR code ID or `new`")),
    responses(
        (status = 200, description = "Form state", body = QrCodeFormResponse),
        (status = 404, description = "QR code not found")
    )
)]
pub async fn get_qr_code(
    State(state): State<crate::AppState>,
    ShopSession(shop): ShopSession,
    Path(id): Path<String>,
) -> AppResult<Json<QrCodeFormResponse>> {
    let response = match parse_form_id(&id)? {
        None => QrCodeFormResponse {
            form: QrCodeForm::default(),
            qr_code: None,
        },
        Some(id) => {
            let view = state.services.qr_codes.get_for_shop(&shop, id).await?;
            QrCodeFormResponse {
                form: QrCodeForm::from(&view),
                qr_code: Some(view),
            }
        }
    };
    Ok(Json(response))
}

/// Save or delete a QR code
#[utoipa::path(
    post,
    path = "/api/qrcodes/{id}",
    tag = "qrcodes",
    security(("session_token" = [])),
    params(("id" = String, Path, description = "QR code ID or `new`")),
    request_body = QrCodeDraft,
    responses(
        (status = 303, description = "Saved: redirect to the QR code; deleted: redirect to the list"),
        (status = 400, description = "Malformed request body", body = crate::error::ErrorResponse),
        (status = 404, description = "QR code not found"),
        (status = 422, description = "Missing fields", body = crate::error::ErrorResponse)
    )
)]
pub async fn submit_qr_code(
    State(state): State<crate::AppState>,
    ShopSession(shop): ShopSession,
    Path(id): Path<String>,
    payload: Result<Json<QrCodeDraft>, JsonRejection>,
) -> AppResult<Redirect> {
    let Json(draft) = payload?;
    let id = parse_form_id(&id)?;
    let service = &state.services.qr_codes;

    if draft.is_delete() {
        let id = id.ok_or_else(|| AppError::BadRequest("Cannot delete an unsaved QR code".to_string()))?;
        service.delete(&shop, id).await?;
        return Ok(Redirect::to("/api/qrcodes"));
    }

    let input = draft_to_input(draft).map_err(AppError::Validation)?;
    let saved = service.save(&shop, id, &input).await?;
    Ok(Redirect::to(&format!("/api/qrcodes/{}", saved.id)))
}
