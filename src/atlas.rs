//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
use crate::*;
use png::{BitDepth, ColorType, Decoder, Transformations};
use std::io::Cursor;

/// Decodes a PNG payload into RGBA8 pixels.
/// Grayscale, palette and RGB inputs are expanded to RGBA; missing alpha becomes 255.
pub fn load_image_bytes(bytes: &[u8]) -> Result<(i32, i32, Vec<u8>), UiError> {
    let mut cursor = Cursor::new(bytes);
    let mut decoder = Decoder::new(&mut cursor);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder.read_info().map_err(|e| UiError::Image(format!("PNG decode error: {}", e)))?;
    let buf_size = reader.output_buffer_size().ok_or_else(|| UiError::Image("PNG decoder did not report output size".into()))?;
    let mut data = vec![0; buf_size];
    let info = reader.next_frame(&mut data).map_err(|e| UiError::Image(format!("PNG decode error: {}", e)))?;

    if info.bit_depth != BitDepth::Eight {
        return Err(UiError::Image(format!("unsupported PNG bit depth: {:?}", info.bit_depth)));
    }

    let pixel_size = match info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => return Err(UiError::Image("indexed PNG was not expanded".into())),
    };

    let (width, height) = (info.width as usize, info.height as usize);
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        let line = &data[y * info.line_size..(y + 1) * info.line_size];
        for px in line.chunks_exact(pixel_size).take(width) {
            let rgba = match info.color_type {
                ColorType::Grayscale => [px[0], px[0], px[0], 0xFF],
                ColorType::GrayscaleAlpha => [px[0], px[0], px[0], px[1]],
                ColorType::Rgb => [px[0], px[1], px[2], 0xFF],
                _ => [px[0], px[1], px[2], px[3]],
            };
            pixels.extend_from_slice(&rgba);
        }
    }
    Ok((width as i32, height as i32, pixels))
}

#[cfg(feature = "builder")]
pub use glyphs::*;

#[cfg(feature = "builder")]
mod glyphs {
    use crate::*;
    use fontdue::{Font, FontSettings};
    use std::collections::HashMap;

    const FIRST_CHAR: u8 = 32;
    const LAST_CHAR: u8 = 127;
    const PADDING: i32 = 1;
    const WHITE_SIZE: i32 = 3;

    #[derive(Copy, Clone, Debug)]
    /// Placement of one rasterized character inside the atlas.
    pub struct Glyph {
        /// Source rectangle in the atlas texture.
        pub rect: Recti,
        /// Bitmap offset from the pen position, `y` measured upwards from the baseline.
        pub offset: Vec2i,
        /// Horizontal advance in pixels at the base size.
        pub advance: f32,
    }

    /// Printable ASCII rasterized once at a base size into an RGBA texture.
    /// Other sizes are drawn by scaling the base glyphs.
    pub struct GlyphAtlas {
        width: i32,
        height: i32,
        pixels: Vec<u8>,
        base_size: f32,
        line_size: f32,
        baseline: f32,
        white: Recti,
        glyphs: HashMap<char, Glyph>,
    }

    impl GlyphAtlas {
        /// Rasterizes a TrueType/OpenType font held in memory.
        pub fn from_font_bytes(bytes: &[u8], base_size: f32, texture_width: i32) -> Result<Self, UiError> {
            let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|e| UiError::Font(e.to_string()))?;

            let mut bitmaps = Vec::new();
            for code in FIRST_CHAR..LAST_CHAR {
                let ch = code as char;
                let (metrics, bitmap) = font.rasterize(ch, base_size);
                bitmaps.push((ch, metrics, bitmap));
            }

            // shelf packing, the white block sits at the origin
            let mut slots = Vec::with_capacity(bitmaps.len());
            let (mut x, mut y, mut row) = (WHITE_SIZE + PADDING, 0, WHITE_SIZE);
            for (_, metrics, _) in &bitmaps {
                let (w, h) = (metrics.width as i32, metrics.height as i32);
                if w + PADDING > texture_width {
                    return Err(UiError::Font(format!("glyph of {}x{} does not fit a {} wide atlas", w, h, texture_width)));
                }
                if x + w > texture_width {
                    x = 0;
                    y += row + PADDING;
                    row = 0;
                }
                slots.push(rect(x, y, w, h));
                x += w + PADDING;
                row = row.max(h);
            }
            let height = (y + row).max(WHITE_SIZE);

            let mut pixels = vec![0u8; (texture_width * height * 4) as usize];
            let white = rect(0, 0, WHITE_SIZE, WHITE_SIZE);
            blit(&mut pixels, texture_width, white, |_, _| 0xFF);

            let mut glyphs = HashMap::new();
            for ((ch, metrics, bitmap), slot) in bitmaps.iter().zip(slots) {
                blit(&mut pixels, texture_width, slot, |gx, gy| bitmap[gx + gy * metrics.width]);
                glyphs.insert(*ch, Glyph { rect: slot, offset: vec2(metrics.xmin, metrics.ymin), advance: metrics.advance_width });
            }

            let (line_size, baseline) = match font.horizontal_line_metrics(base_size) {
                Some(m) => (m.new_line_size, m.ascent),
                None => (base_size, base_size),
            };
            log::debug!("glyph atlas {}x{} at {}px", texture_width, height, base_size);

            Ok(Self { width: texture_width, height, pixels, base_size, line_size, baseline, white, glyphs })
        }

        /// Reads and rasterizes a font file.
        pub fn from_font_file<P: AsRef<std::path::Path>>(path: P, base_size: f32, texture_width: i32) -> Result<Self, UiError> {
            let bytes = std::fs::read(path.as_ref()).map_err(|e| UiError::Font(format!("cannot read font file '{}': {}", path.as_ref().display(), e)))?;
            let atlas = Self::from_font_bytes(&bytes, base_size, texture_width)?;
            log::info!("Loaded font {}", path.as_ref().display());
            Ok(atlas)
        }

        /// Atlas texture width.
        pub fn width(&self) -> i32 { self.width }

        /// Atlas texture height.
        pub fn height(&self) -> i32 { self.height }

        /// RGBA8 atlas pixels, white with coverage in alpha.
        pub fn pixels(&self) -> &[u8] { &self.pixels }

        /// Size the glyphs were rasterized at.
        pub fn base_size(&self) -> f32 { self.base_size }

        /// Opaque white block usable for flat fills from the same texture.
        pub fn white_rect(&self) -> Recti { self.white }

        /// Returns the glyph for `ch`.
        pub fn glyph(&self, ch: char) -> Option<Glyph> { self.glyphs.get(&ch).copied() }

        /// Walks `text` laid out at `pos` and `font_size`, yielding destination and atlas source rectangles.
        /// Characters outside the atlas use `?`.
        pub fn walk_glyphs<F: FnMut(Recti, Recti)>(&self, text: &str, pos: Vec2i, font_size: f32, mut f: F) {
            let scale = font_size / self.base_size;
            let mut pen_x = pos.x as f32;
            let mut baseline = pos.y as f32 + self.baseline * scale;
            for ch in text.chars() {
                if ch == '\n' {
                    pen_x = pos.x as f32;
                    baseline += self.line_size * scale;
                    continue;
                }
                let Some(g) = self.glyph(ch).or_else(|| self.glyph('?')) else {
                    continue;
                };
                if g.rect.width > 0 && g.rect.height > 0 {
                    let dst = rect(
                        (pen_x + g.offset.x as f32 * scale).round() as i32,
                        (baseline - (g.offset.y + g.rect.height) as f32 * scale).round() as i32,
                        (g.rect.width as f32 * scale).round() as i32,
                        (g.rect.height as f32 * scale).round() as i32,
                    );
                    f(dst, g.rect);
                }
                pen_x += g.advance * scale;
            }
        }
    }

    impl TextMetrics for GlyphAtlas {
        fn text_size(&self, text: &str, font_size: f32) -> Dimensioni {
            let scale = font_size / self.base_size;
            let mut widest: f32 = 0.0;
            let mut lines = 0;
            for line in text.split('\n') {
                let width: f32 = line.chars().filter_map(|c| self.glyph(c).or_else(|| self.glyph('?'))).map(|g| g.advance).sum();
                widest = widest.max(width);
                lines += 1;
            }
            Dimensioni::new((widest * scale).round() as i32, (self.line_size * scale * lines as f32).round() as i32)
        }
    }

    fn blit<F: Fn(usize, usize) -> u8>(pixels: &mut [u8], stride: i32, r: Recti, coverage: F) {
        for y in 0..r.height {
            for x in 0..r.width {
                let index = (((r.y + y) * stride + r.x + x) * 4) as usize;
                pixels[index..index + 4].copy_from_slice(&[0xFF, 0xFF, 0xFF, coverage(x as usize, y as usize)]);
            }
        }
    }

}
