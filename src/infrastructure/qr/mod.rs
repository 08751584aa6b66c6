//! QR artifact generation.
//!
//! Encodes a link's target URL - never the short code, so the image
//! resolves directly to the final destination without an extra redirect
//! hop - into an SVG rendered with a fixed visual profile, packaged as a
//! base64 data URL the front end can drop into an `<img>` tag.

use base64::Engine as _;
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

/// Rendered width and height in pixels.
const QR_WIDTH_PX: u32 = 200;

/// Foreground module color.
const QR_DARK_COLOR: &str = "#1976d2";

/// Background color.
const QR_LIGHT_COLOR: &str = "#f8f9fa";

/// Errors that can occur while building a QR artifact.
///
/// Build failures are non-fatal to link creation: the link persists without
/// an artifact and can be repaired later by the backfill pass.
#[derive(Debug, thiserror::Error)]
pub enum QrBuildError {
    #[error("target URL cannot be QR-encoded: {0}")]
    Encoding(#[from] qrcode::types::QrError),
}

/// Side-effect-free QR artifact builder.
///
/// Implemented by [`SvgQrBuilder`]; mocked in service tests to exercise the
/// failure path deterministically.
#[cfg_attr(test, mockall::automock)]
pub trait QrBuilder: Send + Sync {
    /// Encodes `target_url` into an opaque artifact payload.
    ///
    /// Building twice for the same input yields the same artifact, so
    /// re-running a backfill simply overwrites with an identical payload.
    ///
    /// # Errors
    ///
    /// Returns [`QrBuildError`] when the input exceeds QR capacity at the
    /// configured error-correction level.
    fn build(&self, target_url: &str) -> Result<String, QrBuildError>;
}

/// Builds SVG QR codes with the service's fixed visual profile:
/// high error correction, 200px, two-tone blue-on-grey.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgQrBuilder;

impl SvgQrBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl QrBuilder for SvgQrBuilder {
    fn build(&self, target_url: &str) -> Result<String, QrBuildError> {
        let code = QrCode::with_error_correction_level(target_url.as_bytes(), EcLevel::H)?;

        let image = code
            .render::<svg::Color>()
            .min_dimensions(QR_WIDTH_PX, QR_WIDTH_PX)
            .dark_color(svg::Color(QR_DARK_COLOR))
            .light_color(svg::Color(QR_LIGHT_COLOR))
            .quiet_zone(true)
            .build();

        let encoded = base64::engine::general_purpose::STANDARD.encode(image);

        Ok(format!("data:image/svg+xml;base64,{encoded}"))
    }
}
