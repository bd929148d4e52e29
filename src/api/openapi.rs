//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, qr_codes, scan};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "QR Codes API",
        version = "1.0.0",
        description = "QR code management for the embedded admin app and public scan redirects",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Admin
        qr_codes::list_qr_codes,
        qr_codes::get_qr_code,
        qr_codes::submit_qr_code,
        // Public
        scan::scan_qr_code,
        scan::public_qr_code,
    ),
    components(
        schemas(
            crate::models::qr_code::QrCode,
            crate::models::qr_code::Destination,
            crate::models::qr_code::QrCodeDraft,
            crate::models::qr_code::QrCodeForm,
            crate::models::qr_code::EnrichedQrCode,
            crate::models::product::ProductSummary,
            qr_codes::QrCodeRow,
            qr_codes::QrCodeFormResponse,
            scan::PublicQrCode,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SessionTokenAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "qrcodes", description = "QR code management"),
        (name = "public", description = "Scan redirects and printable codes")
    )
)]
pub struct ApiDoc;

struct SessionTokenAuth;

impl Modify for SessionTokenAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
