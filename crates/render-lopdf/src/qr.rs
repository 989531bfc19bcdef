use image::{GrayImage, Luma};
use labelsheet_render_core::{CodeImage, CodeRenderer, RenderError};
use qrcode::{Color, EcLevel, QrCode};

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Renders identifiers as QR codes, one pixel per module.
#[derive(Debug, Clone, Copy)]
pub struct QrCodeRenderer {
    pub ec_level: EcLevel,
    /// Light modules around the symbol, in modules.
    pub quiet_zone: u32,
}

impl Default for QrCodeRenderer {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::M,
            quiet_zone: 4,
        }
    }
}

impl CodeRenderer for QrCodeRenderer {
    fn render(&self, identifier: &str) -> Result<CodeImage, RenderError> {
        let code = QrCode::with_error_correction_level(identifier.as_bytes(), self.ec_level)
            .map_err(|e| RenderError::Code {
                identifier: identifier.to_string(),
                message: e.to_string(),
            })?;

        let modules = code.width() as u32;
        let colors = code.to_colors();
        let qz = self.quiet_zone;
        let size = modules + 2 * qz;

        let pixels = GrayImage::from_fn(size, size, |x, y| {
            if x < qz || y < qz || x >= qz + modules || y >= qz + modules {
                return LIGHT;
            }
            let index = ((y - qz) * modules + (x - qz)) as usize;
            match colors[index] {
                Color::Dark => DARK,
                Color::Light => LIGHT,
            }
        });
        Ok(CodeImage::new(pixels))
    }
}
