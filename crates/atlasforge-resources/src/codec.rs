//! Binary encoding of packed atlases.
//!
//! An encoded atlas is a gzip-compressed JSON record. The picture travels
//! inside the record as a base64 PNG so the whole artifact is a single blob
//! that can live in one resource entry.

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};

use atlasforge_core::image::{self, ImageFormat, RgbaImage};
use atlasforge_core::{AtlasPoint, AtlasRect, NormalizedGlyph, PackedAtlas};
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{ResourceError, ResourceResult};

/// A finished atlas ready to be stored: picture plus glyph metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasData {
    /// Identifier of the font the atlas was rendered from.
    pub font: String,
    /// Point size the font was rendered at.
    pub size: u16,
    /// Tallest glyph frame in pixels.
    pub max_glyph_height: f32,
    /// Texture-space placement of each glyph.
    pub glyphs: BTreeMap<char, NormalizedGlyph>,
    /// The atlas picture.
    pub picture: RgbaImage,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AtlasRecord {
    font: String,
    size: u16,
    max_glyph_height: f32,
    width: u32,
    height: u32,
    glyphs: Vec<GlyphRecord>,
    picture: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GlyphRecord {
    code_point: char,
    dot: AtlasPoint,
    frame: AtlasRect,
    advance: f32,
}

impl AtlasData {
    /// Wrap a packed atlas with the font it came from.
    pub fn new(font: impl Into<String>, size: u16, atlas: PackedAtlas) -> Self {
        Self {
            font: font.into(),
            size,
            max_glyph_height: atlas.max_glyph_height,
            glyphs: atlas.glyphs,
            picture: atlas.canvas,
        }
    }

    /// Encode into the compressed on-disk form.
    pub fn to_bytes(&self) -> ResourceResult<Vec<u8>> {
        let record = AtlasRecord {
            font: self.font.clone(),
            size: self.size,
            max_glyph_height: self.max_glyph_height,
            width: self.picture.width(),
            height: self.picture.height(),
            glyphs: self
                .glyphs
                .iter()
                .map(|(&code_point, glyph)| GlyphRecord {
                    code_point,
                    dot: glyph.dot,
                    frame: glyph.frame,
                    advance: glyph.advance,
                })
                .collect(),
            picture: encode_picture(&self.picture)?,
        };

        let json = serde_json::to_vec(&record).map_err(|e| ResourceError::codec("json", e))?;

        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&json)
            .map_err(|e| ResourceError::codec("gzip", e))?;
        encoder.finish().map_err(|e| ResourceError::codec("gzip", e))
    }

    /// Decode bytes produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(data: &[u8]) -> ResourceResult<Self> {
        let mut decoder = flate2::read::GzDecoder::new(data);
        let mut json = Vec::new();
        decoder
            .read_to_end(&mut json)
            .map_err(|e| ResourceError::codec("gzip", e))?;

        let record: AtlasRecord =
            serde_json::from_slice(&json).map_err(|e| ResourceError::codec("json", e))?;

        let picture = decode_picture(&record.picture)?;
        if picture.dimensions() != (record.width, record.height) {
            return Err(ResourceError::Codec(format!(
                "picture is {}x{}, record says {}x{}",
                picture.width(),
                picture.height(),
                record.width,
                record.height
            )));
        }

        let glyphs = record
            .glyphs
            .into_iter()
            .map(|g| {
                (
                    g.code_point,
                    NormalizedGlyph {
                        dot: g.dot,
                        frame: g.frame,
                        advance: g.advance,
                    },
                )
            })
            .collect();

        Ok(Self {
            font: record.font,
            size: record.size,
            max_glyph_height: record.max_glyph_height,
            glyphs,
            picture,
        })
    }
}

// PNG cannot hold a zero-sized image, so an empty picture is stored as "".
fn encode_picture(picture: &RgbaImage) -> ResourceResult<String> {
    if picture.width() == 0 || picture.height() == 0 {
        return Ok(String::new());
    }
    let mut png = Vec::new();
    picture
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| ResourceError::codec("png", e))?;
    Ok(base64::engine::general_purpose::STANDARD.encode(png))
}

fn decode_picture(encoded: &str) -> ResourceResult<RgbaImage> {
    if encoded.is_empty() {
        return Ok(RgbaImage::new(0, 0));
    }
    let png = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| ResourceError::codec("base64", e))?;
    let picture = image::load_from_memory_with_format(&png, ImageFormat::Png)
        .map_err(|e| ResourceError::codec("png", e))?;
    Ok(picture.into_rgba8())
}
