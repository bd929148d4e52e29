//! Data models for the QR codes server

pub mod product;
pub mod qr_code;
pub mod session;

// Re-export commonly used types
pub use product::ProductSummary;
pub use qr_code::{Destination, EnrichedQrCode, QrCode, QrCodeDraft, QrCodeForm, QrCodeInput};
pub use session::SessionClaims;
