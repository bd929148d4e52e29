//! API handlers for the QR codes server

pub mod health;
pub mod openapi;
pub mod qr_codes;
pub mod scan;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::SessionClaims, AppState};

/// Shop of the admin user, taken from the session token
pub struct ShopSession(pub String);

#[async_trait]
impl FromRequestParts<AppState> for ShopSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let shopify = &state.config.shopify;
        let claims = SessionClaims::from_token(token, &shopify.api_secret, &shopify.api_key)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(ShopSession(claims.shop()?))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check));

    // Embedded admin app
    let admin = Router::new()
        .route("/qrcodes", get(qr_codes::list_qr_codes))
        .route(
            "/qrcodes/:id",
            get(qr_codes::get_qr_code).post(qr_codes::submit_qr_code),
        );

    // Reached by customers' phones, no session
    let public = Router::new()
        .route("/qrcodes/:id", get(scan::public_qr_code))
        .route("/qrcodes/:id/scan", get(scan::scan_qr_code));

    Router::new()
        .nest("/api/v1", api_v1)
        .nest("/api", admin)
        .merge(public)
        .with_state(state)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
