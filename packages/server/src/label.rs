//! QR labels for chemical bottles.
//!
//! A label is a PNG QR code whose payload is a fixed, human-readable summary
//! of the record, so any phone scanner shows the essentials without network
//! access.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageBuffer, ImageFormat, Luma, imageops};
use qrcode::{EcLevel, QrCode};
use thiserror::Error;

use crate::entity::chemical;
use crate::models::chemical::format_id;

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("PNG rendering failed: {0}")]
    Render(#[from] image::ImageError),
}

/// A rendered label together with the text it encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub png: Vec<u8>,
    pub text: String,
}

impl Label {
    /// Standard base64 of the PNG bytes, for embedding in JSON.
    pub fn png_base64(&self) -> String {
        STANDARD.encode(&self.png)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LabelEncoder {
    size: u32,
}

impl Default for LabelEncoder {
    fn default() -> Self {
        Self::new(200)
    }
}

impl LabelEncoder {
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    pub fn encode(&self, record: &chemical::Model) -> Result<Label, LabelError> {
        let text = label_text(record);
        let png = self.render(&text)?;
        Ok(Label { png, text })
    }

    /// Render `text` as a `size x size` PNG QR code.
    ///
    /// Symbols too large to fit at one pixel per module are emitted at their
    /// natural size rather than being scaled into an unreadable image.
    pub fn render(&self, text: &str) -> Result<Vec<u8>, LabelError> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::L)?;
        let symbol = code
            .render::<Luma<u8>>()
            .quiet_zone(true)
            .max_dimensions(self.size, self.size)
            .build();

        let image = if symbol.width() < self.size && symbol.height() < self.size {
            let mut canvas = ImageBuffer::from_pixel(self.size, self.size, Luma([255u8]));
            let x = i64::from((self.size - symbol.width()) / 2);
            let y = i64::from((self.size - symbol.height()) / 2);
            imageops::overlay(&mut canvas, &symbol, x, y);
            canvas
        } else {
            symbol
        };

        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }
}

/// The multi-line summary encoded into a label.
pub fn label_text(record: &chemical::Model) -> String {
    let field = |value: &Option<String>| value.clone().unwrap_or_default();

    [
        "化学品信息:".to_string(),
        format!("药品编号: {}", format_id(record.id)),
        format!("CAS号: {}", field(&record.cas_number)),
        format!("中文名: {}", field(&record.name)),
        format!("外文名: {}", field(&record.english_name)),
        format!("浓度: {}", field(&record.concentration)),
        format!("规格: {}", field(&record.specification)),
        format!("分子量: {}", field(&record.weight)),
        format!("分子式: {}", field(&record.formula)),
        format!("厂家: {}", field(&record.manufacturer)),
    ]
    .join("\n")
}
