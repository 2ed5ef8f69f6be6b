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
#![deny(missing_docs)]
//! `svui` is a small retained widget scene: draggable and resizable panels that own text labels
//! and buttons. The scene is built once through a fluent construction API, fed polled input events
//! every frame and painted through the [`Renderer`] seam, so any backend able to fill rectangles,
//! blit textures and draw text can host it.

use std::sync::{Arc, RwLock};

mod alignment;
#[cfg(any(feature = "builder", feature = "png_source"))]
mod atlas;
mod canvas;
mod component;
mod config;
mod error;
mod scene;
mod widget;

pub use alignment::*;
#[cfg(any(feature = "builder", feature = "png_source"))]
pub use atlas::*;
pub use canvas::*;
pub use component::*;
pub use config::*;
pub use error::*;
pub use rs_math3d::*;
pub use scene::*;
pub use widget::*;

use bitflags::*;

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
/// Simple RGBA color stored with 8-bit components.
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Builds an opaque color from normalized `[0, 1]` channels.
    pub fn from_rgb_f32(r: f32, g: f32, b: f32) -> Self {
        fn channel(v: f32) -> u8 { (v.clamp(0.0, 1.0) * 255.0).round() as u8 }
        Self { r: channel(r), g: channel(g), b: channel(b), a: 255 }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Handle referencing a renderer-owned texture.
pub struct TextureId(u32);

impl TextureId {
    /// Returns the raw numeric identifier stored inside the handle.
    pub fn raw(self) -> u32 { self.0 }
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Caller supplied widget identifier. Not required to be unique, lookups return the first match.
pub struct WidgetId(pub i32);

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Mouse button state as reported by the input system.
    pub struct MouseButton : u32 {
        /// Middle mouse button.
        const MIDDLE = 4;
        /// Right mouse button.
        const RIGHT = 2;
        /// Left mouse button.
        const LEFT = 1;
        /// No buttons pressed.
        const NONE = 0;
    }

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Options accepted by [`Scene::create_widget`].
    pub struct WidgetOption : u32 {
        /// Resizing from any edge.
        const RESIZABLE = Self::RESIZABLE_LEFT.bits() | Self::RESIZABLE_RIGHT.bits() | Self::RESIZABLE_TOP.bits() | Self::RESIZABLE_BOTTOM.bits();
        /// The bottom edge can be dragged.
        const RESIZABLE_BOTTOM = 16;
        /// The top edge can be dragged.
        const RESIZABLE_TOP = 8;
        /// The right edge can be dragged.
        const RESIZABLE_RIGHT = 4;
        /// The left edge can be dragged.
        const RESIZABLE_LEFT = 2;
        /// The whole widget follows the pointer while the left button is held.
        const DRAGGABLE = 1;
        /// No special options.
        const NONE = 0;
    }
}

impl MouseButton {
    /// Returns `true` if the left mouse button is set.
    pub fn is_left(&self) -> bool { self.intersects(Self::LEFT) }
    /// Returns `true` if the right mouse button is set.
    pub fn is_right(&self) -> bool { self.intersects(Self::RIGHT) }
    /// Returns `true` if the middle mouse button is set.
    pub fn is_middle(&self) -> bool { self.intersects(Self::MIDDLE) }
}

impl WidgetOption {
    /// Returns `true` if the widget gets a drag behavior.
    pub fn is_draggable(&self) -> bool { self.intersects(Self::DRAGGABLE) }
    /// Returns `true` if at least one edge can be resized.
    pub fn is_resizable(&self) -> bool { self.intersects(Self::RESIZABLE) }
}

#[derive(Copy, Clone, Debug)]
/// Discrete input event produced by the host's event pump.
pub enum InputEvent {
    /// A mouse button went down at `pos`.
    PointerDown {
        /// Button that changed.
        button: MouseButton,
        /// Pointer position in window pixels.
        pos: Vec2i,
    },
    /// A mouse button was released at `pos`.
    PointerUp {
        /// Button that changed.
        button: MouseButton,
        /// Pointer position in window pixels.
        pos: Vec2i,
    },
    /// The pointer moved to `pos`.
    PointerMove {
        /// Pointer position in window pixels.
        pos: Vec2i,
    },
    /// The host asked to close the application.
    Quit,
}

impl InputEvent {
    /// Convenience constructor for a press.
    pub fn down(button: MouseButton, x: i32, y: i32) -> Self { Self::PointerDown { button, pos: vec2(x, y) } }
    /// Convenience constructor for a release.
    pub fn up(button: MouseButton, x: i32, y: i32) -> Self { Self::PointerUp { button, pos: vec2(x, y) } }
    /// Convenience constructor for a pointer move.
    pub fn motion(x: i32, y: i32) -> Self { Self::PointerMove { pos: vec2(x, y) } }

    /// Returns the pointer position carried by the event, if any.
    pub fn pos(&self) -> Option<Vec2i> {
        match self {
            Self::PointerDown { pos, .. } | Self::PointerUp { pos, .. } | Self::PointerMove { pos } => Some(*pos),
            Self::Quit => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
/// Pointer shape requested by the scene.
pub enum CursorKind {
    /// Default arrow.
    #[default]
    Arrow,
    /// Horizontal (west-east) resize arrow.
    SizeWE,
    /// Vertical (north-south) resize arrow.
    SizeNS,
}

/// Measures rendered text.
pub trait TextMetrics {
    /// Returns the pixel width and height of `text` rendered at `font_size`.
    fn text_size(&self, text: &str, font_size: f32) -> Dimensioni;
}

/// Fixed advance text metrics, useful for headless hosts and tests.
/// Every character advances by `advance * font_size` and a line is `line_height * font_size` tall.
#[derive(Copy, Clone, Debug)]
pub struct MonospaceMetrics {
    /// Advance per character, relative to the font size.
    pub advance: f32,
    /// Line height, relative to the font size.
    pub line_height: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self { Self { advance: 0.5, line_height: 1.0 } }
}

impl TextMetrics for MonospaceMetrics {
    fn text_size(&self, text: &str, font_size: f32) -> Dimensioni {
        let chars = text.chars().count() as f32;
        Dimensioni::new((chars * self.advance * font_size).round() as i32, (self.line_height * font_size).round() as i32)
    }
}

/// Trait implemented by render backends used by the scene.
pub trait Renderer {
    /// Returns the text measurement service matching [`Renderer::draw_text`].
    fn metrics(&self) -> &dyn TextMetrics;
    /// Begins a new frame with the viewport size and clear color.
    fn begin(&mut self, width: i32, height: i32, clr: Color);
    /// Paints a rectangle with a flat color.
    fn fill_rect(&mut self, rect: Recti, color: Color);
    /// Paints a rectangle sampling the whole texture, modulated by `tint`.
    fn draw_texture(&mut self, id: TextureId, rect: Recti, tint: Color);
    /// Draws a single line of text with its top-left corner at `pos`.
    fn draw_text(&mut self, text: &str, pos: Vec2i, font_size: f32, color: Color);
    /// Ends the frame, finalizing any outstanding GPU work.
    fn end(&mut self);
    /// Creates a texture owned by the renderer from RGBA8 pixels.
    fn create_texture(&mut self, id: TextureId, width: i32, height: i32, pixels: &[u8]);
    /// Destroys a previously created texture.
    fn destroy_texture(&mut self, id: TextureId);
}

/// Thread-safe handle that shares ownership of a [`Renderer`].
pub struct RendererHandle<R: Renderer> {
    handle: Arc<RwLock<R>>,
}

// seems there's a bug in #[derive(Clone)] as it's unable to induce that Arc is sufficient
impl<R: Renderer> Clone for RendererHandle<R> {
    fn clone(&self) -> Self { Self { handle: self.handle.clone() } }
}

impl<R: Renderer> RendererHandle<R> {
    /// Wraps a renderer inside an [`Arc<RwLock<...>>`] so it can be shared.
    pub fn new(renderer: R) -> Self { Self { handle: Arc::new(RwLock::new(renderer)) } }

    /// Executes the provided closure with a shared reference to the renderer.
    pub fn scope<Res, F: FnOnce(&R) -> Res>(&self, f: F) -> Res {
        match self.handle.read() {
            Ok(guard) => f(&*guard),
            // poisoned locks still hand out the data
            Err(poisoned) => f(&*poisoned.into_inner()),
        }
    }

    /// Executes the provided closure with a mutable reference to the renderer.
    pub fn scope_mut<Res, F: FnOnce(&mut R) -> Res>(&mut self, f: F) -> Res {
        match self.handle.write() {
            Ok(mut guard) => f(&mut *guard),
            Err(poisoned) => f(&mut *poisoned.into_inner()),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
/// Flat color triples used by buttons.
pub struct ButtonStyle {
    /// Idle fill.
    pub normal: Color,
    /// Fill while the pointer is over the button.
    pub hover: Color,
    /// Fill while the left button is held on the button.
    pub pressed: Color,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            normal: color(178, 178, 178, 255),
            hover: color(204, 204, 204, 255),
            pressed: color(153, 153, 153, 255),
        }
    }
}

#[derive(Copy, Clone, Debug)]
/// Collection of visual constants that drive widget appearance and interaction.
pub struct Style {
    /// Colors applied to new buttons.
    pub button: ButtonStyle,
    /// Fill used for widgets without a background texture.
    pub widget_color: Color,
    /// Color of text labels.
    pub text_color: Color,
    /// Distance in pixels from an edge within which a press starts a resize.
    pub edge_threshold: i32,
    /// Font size used when a caller passes a non positive size.
    pub default_font_size: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            button: ButtonStyle::default(),
            widget_color: color(255, 0, 0, 255),
            text_color: color(255, 255, 255, 255),
            edge_threshold: 10,
            default_font_size: 16.0,
        }
    }
}

/// Convenience constructor for [`Vec2i`].
pub fn vec2(x: i32, y: i32) -> Vec2i { Vec2i { x, y } }

/// Convenience constructor for [`Recti`].
pub fn rect(x: i32, y: i32, w: i32, h: i32) -> Recti { Recti { x, y, width: w, height: h } }

/// Convenience constructor for [`Color`].
pub fn color(r: u8, g: u8, b: u8, a: u8) -> Color { Color { r, g, b, a } }

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum DrawCall {
        Fill { rect: (i32, i32, i32, i32), color: Color },
        Texture { id: u32, rect: (i32, i32, i32, i32) },
        Text { text: String, pos: (i32, i32), size: f32 },
    }

    /// Records every draw call instead of touching a GPU.
    #[derive(Default)]
    pub struct RecordingRenderer {
        pub metrics: MonospaceMetrics,
        pub calls: Vec<DrawCall>,
        pub live_textures: Vec<u32>,
    }

    impl Renderer for RecordingRenderer {
        fn metrics(&self) -> &dyn TextMetrics { &self.metrics }
        fn begin(&mut self, _width: i32, _height: i32, _clr: Color) { self.calls.clear(); }
        fn fill_rect(&mut self, r: Recti, color: Color) { self.calls.push(DrawCall::Fill { rect: (r.x, r.y, r.width, r.height), color }); }
        fn draw_texture(&mut self, id: TextureId, r: Recti, _tint: Color) {
            self.calls.push(DrawCall::Texture { id: id.raw(), rect: (r.x, r.y, r.width, r.height) });
        }
        fn draw_text(&mut self, text: &str, pos: Vec2i, font_size: f32, _color: Color) {
            self.calls.push(DrawCall::Text { text: text.to_string(), pos: (pos.x, pos.y), size: font_size });
        }
        fn end(&mut self) {}
        fn create_texture(&mut self, id: TextureId, _width: i32, _height: i32, _pixels: &[u8]) { self.live_textures.push(id.raw()); }
        fn destroy_texture(&mut self, id: TextureId) { self.live_textures.retain(|t| *t != id.raw()); }
    }

    pub fn recording_canvas() -> (RendererHandle<RecordingRenderer>, Canvas<RecordingRenderer>) {
        let handle = RendererHandle::new(RecordingRenderer::default());
        let canvas = Canvas::from(handle.clone(), Dimensioni::new(800, 600));
        (handle, canvas)
    }

    pub fn text_calls(handle: &RendererHandle<RecordingRenderer>) -> Vec<(String, (i32, i32))> {
        handle.scope(|r| {
            r.calls
                .iter()
                .filter_map(|c| match c {
                    DrawCall::Text { text, pos, .. } => Some((text.clone(), *pos)),
                    _ => None,
                })
                .collect()
        })
    }
}
