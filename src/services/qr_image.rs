//! QR image rendering

use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;
use reqwest::Url;

use crate::error::{AppError, AppResult};

const MIN_IMAGE_SIZE: u32 = 256;

/// Renders the scan link of a QR code as a PNG data URI
#[derive(Debug, Clone)]
pub struct QrImageGenerator {
    base_url: Url,
}

impl QrImageGenerator {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Public scan link encoded into the image
    pub fn scan_url(&self, id: i32) -> AppResult<Url> {
        self.base_url
            .join(&format!("/qrcodes/{}/scan", id))
            .map_err(|e| AppError::Internal(format!("Invalid scan URL for {}: {}", id, e)))
    }

    pub fn generate(&self, id: i32) -> AppResult<String> {
        let url = self.scan_url(id)?;
        let code = QrCode::new(url.as_str().as_bytes())
            .map_err(|e| AppError::ImageEncoding(e.to_string()))?;

        let pixels = code
            .render::<Luma<u8>>()
            .min_dimensions(MIN_IMAGE_SIZE, MIN_IMAGE_SIZE)
            .build();

        let mut png = Cursor::new(Vec::new());
        DynamicImage::ImageLuma8(pixels)
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|e| AppError::ImageEncoding(e.to_string()))?;

        Ok(format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(png.into_inner())
        ))
    }
}
