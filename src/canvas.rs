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
use super::*;
use std::collections::HashMap;

/// Drawing front end used by the scene; every paint call reaches the renderer through here.
/// The canvas owns the textures it loads and destroys the remaining ones when dropped.
pub struct Canvas<R: Renderer> {
    current_dim: Dimensioni,
    renderer: RendererHandle<R>,
    next_texture_id: u32,
    textures: HashMap<TextureId, TextureInfo>,
}

#[derive(Clone, Copy)]
struct TextureInfo {
    width: i32,
    height: i32,
}

impl<R: Renderer> Canvas<R> {
    /// Creates a canvas around the provided renderer handle.
    pub fn from(renderer: RendererHandle<R>, dim: Dimensioni) -> Self {
        Self {
            current_dim: dim,
            renderer,
            next_texture_id: 1,
            textures: HashMap::new(),
        }
    }

    /// Begins a frame, clearing to `clr`.
    pub fn begin(&mut self, width: i32, height: i32, clr: Color) {
        self.current_dim = Dimensioni::new(width, height);
        self.renderer.scope_mut(|r| r.begin(width, height, clr));
    }

    /// Ends the frame.
    pub fn end(&mut self) { self.renderer.scope_mut(|r| r.end()) }

    /// Returns the dimension passed to the last [`Canvas::begin`].
    pub fn current_dimension(&self) -> Dimensioni { self.current_dim }

    /// Returns a clone of the renderer handle.
    pub fn renderer_handle(&self) -> RendererHandle<R> { self.renderer.clone() }

    /// Paints a flat colored rectangle. Empty rectangles are skipped.
    pub fn fill_rect(&mut self, rect: Recti, color: Color) {
        if rect.width <= 0 || rect.height <= 0 {
            return;
        }
        self.renderer.scope_mut(|r| r.fill_rect(rect, color));
    }

    /// Paints a texture stretched over `rect`.
    pub fn draw_image(&mut self, id: TextureId, rect: Recti, tint: Color) {
        if rect.width <= 0 || rect.height <= 0 {
            return;
        }
        if !self.textures.contains_key(&id) {
            log::warn!("draw_image: texture {} is not owned by this canvas", id.raw());
            return;
        }
        self.renderer.scope_mut(|r| r.draw_texture(id, rect, tint));
    }

    /// Draws `text` with its top-left corner at `pos`.
    pub fn draw_text(&mut self, text: &str, pos: Vec2i, font_size: f32, color: Color) {
        if text.is_empty() {
            return;
        }
        self.renderer.scope_mut(|r| r.draw_text(text, pos, font_size, color));
    }

    /// Measures `text` with the renderer's metrics.
    pub fn text_size(&self, text: &str, font_size: f32) -> Dimensioni { self.renderer.scope(|r| r.metrics().text_size(text, font_size)) }

    /// Uploads RGBA8 pixels and returns the new texture handle.
    pub fn load_texture_rgba(&mut self, width: i32, height: i32, pixels: &[u8]) -> Result<TextureId, UiError> {
        if width <= 0 || height <= 0 {
            return Err(UiError::Image(format!("texture dimensions must be positive, got {}x{}", width, height)));
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(UiError::Image(format!("expected {} RGBA bytes, found {}", expected, pixels.len())));
        }
        let id = TextureId(self.next_texture_id);
        self.next_texture_id += 1;
        self.renderer.scope_mut(|r| r.create_texture(id, width, height, pixels));
        self.textures.insert(id, TextureInfo { width, height });
        Ok(id)
    }

    /// Decodes a PNG payload and uploads it.
    #[cfg(any(feature = "builder", feature = "png_source"))]
    pub fn load_texture_png(&mut self, bytes: &[u8]) -> Result<TextureId, UiError> {
        let (width, height, pixels) = load_image_bytes(bytes)?;
        self.load_texture_rgba(width, height, &pixels)
    }

    /// Reads and uploads a PNG file.
    #[cfg(any(feature = "builder", feature = "png_source"))]
    pub fn load_texture_file<P: AsRef<std::path::Path>>(&mut self, path: P) -> Result<TextureId, UiError> {
        let bytes = std::fs::read(path.as_ref())?;
        let id = self.load_texture_png(&bytes)?;
        log::info!("Loaded texture {} from {}", id.raw(), path.as_ref().display());
        Ok(id)
    }

    /// Returns the pixel size of a texture owned by this canvas.
    pub fn texture_size(&self, id: TextureId) -> Option<Dimensioni> { self.textures.get(&id).map(|t| Dimensioni::new(t.width, t.height)) }

    /// Destroys a texture. Unknown handles are ignored.
    pub fn free_texture(&mut self, id: TextureId) {
        if self.textures.remove(&id).is_some() {
            self.renderer.scope_mut(|r| r.destroy_texture(id));
        }
    }
}

impl<R: Renderer> Drop for Canvas<R> {
    fn drop(&mut self) {
        let ids: Vec<_> = self.textures.keys().copied().collect();
        self.renderer.scope_mut(|r| {
            for id in &ids {
                r.destroy_texture(*id);
            }
        });
        self.textures.clear();
    }
}
