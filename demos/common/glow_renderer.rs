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
use std::collections::HashMap;
use std::sync::Arc;

use super::glow_common;
use glow::*;
use svui::*;

const VERTEX_SHADER: &str = "#version 100
uniform highp mat4 uTransform;
attribute highp vec2 vertexPosition;
attribute highp vec2 vertexTexCoord;
attribute lowp vec4 vertexColor;
varying highp vec2 vTexCoord;
varying lowp vec4 vVertexColor;
void main()
{
    vVertexColor = vertexColor;
    vTexCoord = vertexTexCoord;
    gl_Position = uTransform * vec4(vertexPosition.x, vertexPosition.y, 0.0, 1.0);
}";

const FRAGMENT_SHADER: &str = "#version 100
varying highp vec2 vTexCoord;
varying lowp vec4 vVertexColor;
uniform sampler2D uTexture;
void main()
{
    gl_FragColor = texture2D(uTexture, vTexCoord) * vVertexColor;
}";

#[derive(Copy, Clone)]
#[repr(C)]
struct Vertex {
    pos: [f32; 2],
    tex: [f32; 2],
    color: [f32; 4],
}

/// Batches textured quads; flat fills and text sample the glyph atlas.
pub struct GLRenderer {
    gl: Arc<glow::Context>,
    verts: Vec<Vertex>,
    indices: Vec<u16>,

    vbo: NativeBuffer,
    ibo: NativeBuffer,
    program: NativeProgram,

    atlas: GlyphAtlas,
    atlas_texture: NativeTexture,
    textures: HashMap<TextureId, NativeTexture>,
    bound: NativeTexture,

    width: u32,
    height: u32,
}

impl GLRenderer {
    pub fn new(gl: Arc<glow::Context>, atlas: GlyphAtlas, width: u32, height: u32) -> Result<Self, String> {
        assert_eq!(core::mem::size_of::<Vertex>(), 32);
        let atlas_texture = glow_common::upload_rgba(&gl, atlas.width(), atlas.height(), atlas.pixels(), glow::LINEAR)?;
        let program = glow_common::create_program(&gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
        let (vbo, ibo) = unsafe { (gl.create_buffer()?, gl.create_buffer()?) };
        Ok(Self {
            gl,
            verts: Vec::new(),
            indices: Vec::new(),
            vbo,
            ibo,
            program,
            atlas,
            atlas_texture,
            textures: HashMap::new(),
            bound: atlas_texture,
            width,
            height,
        })
    }

    fn atlas_uv(&self, r: Recti) -> [f32; 4] {
        let (w, h) = (self.atlas.width() as f32, self.atlas.height() as f32);
        [r.x as f32 / w, r.y as f32 / h, (r.x + r.width) as f32 / w, (r.y + r.height) as f32 / h]
    }

    fn bind(&mut self, texture: NativeTexture) {
        if self.bound != texture {
            self.flush();
            self.bound = texture;
        }
    }

    fn push_quad(&mut self, dst: Recti, uv: [f32; 4], color: Color) {
        if self.verts.len() + 4 >= 65536 || self.indices.len() + 6 >= 65536 {
            self.flush();
        }
        let c = [color.r as f32 / 255.0, color.g as f32 / 255.0, color.b as f32 / 255.0, color.a as f32 / 255.0];
        let (x0, y0) = (dst.x as f32, dst.y as f32);
        let (x1, y1) = ((dst.x + dst.width) as f32, (dst.y + dst.height) as f32);

        let is = self.verts.len() as u16;
        self.indices.extend_from_slice(&[is, is + 1, is + 2, is + 2, is + 3, is]);
        self.verts.push(Vertex { pos: [x0, y0], tex: [uv[0], uv[1]], color: c });
        self.verts.push(Vertex { pos: [x1, y0], tex: [uv[2], uv[1]], color: c });
        self.verts.push(Vertex { pos: [x1, y1], tex: [uv[2], uv[3]], color: c });
        self.verts.push(Vertex { pos: [x0, y1], tex: [uv[0], uv[3]], color: c });
    }

    fn flush(&mut self) {
        if self.verts.is_empty() || self.indices.is_empty() {
            return;
        }

        let gl = &self.gl;
        unsafe {
            gl.viewport(0, 0, self.width as i32, self.height as i32);
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            gl.disable(glow::CULL_FACE);
            gl.disable(glow::DEPTH_TEST);
            debug_assert!(gl.get_error() == 0);

            gl.use_program(Some(self.program));
            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.bound));
            let tex_uniform = gl.get_uniform_location(self.program, "uTexture");
            gl.uniform_1_i32(tex_uniform.as_ref(), 0);

            let transform = gl.get_uniform_location(self.program, "uTransform");
            let tm = ortho4(0.0, self.width as f32, self.height as f32, 0.0, -1.0, 1.0);
            let tm_slice = std::slice::from_raw_parts(tm.col.as_ptr() as *const f32, 16);
            gl.uniform_matrix_4_f32_slice(transform.as_ref(), false, tm_slice);
            debug_assert_eq!(gl.get_error(), 0);

            let attribs = ["vertexPosition", "vertexTexCoord", "vertexColor"].map(|name| gl.get_attrib_location(self.program, name));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.ibo));

            let vertices_u8 = core::slice::from_raw_parts(self.verts.as_ptr() as *const u8, self.verts.len() * core::mem::size_of::<Vertex>());
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, vertices_u8, glow::DYNAMIC_DRAW);
            let indices_u8 = core::slice::from_raw_parts(self.indices.as_ptr() as *const u8, self.indices.len() * core::mem::size_of::<u16>());
            gl.buffer_data_u8_slice(glow::ELEMENT_ARRAY_BUFFER, indices_u8, glow::DYNAMIC_DRAW);

            for (attrib, (size, offset)) in attribs.iter().zip([(2, 0), (2, 8), (4, 16)]) {
                if let Some(id) = attrib {
                    gl.enable_vertex_attrib_array(*id);
                    gl.vertex_attrib_pointer_f32(*id, size, glow::FLOAT, false, 32, offset);
                }
            }
            debug_assert!(gl.get_error() == 0);

            gl.draw_elements(glow::TRIANGLES, self.indices.len() as i32, glow::UNSIGNED_SHORT, 0);
            debug_assert!(gl.get_error() == 0);

            for id in attribs.iter().flatten() {
                gl.disable_vertex_attrib_array(*id);
            }
            gl.use_program(None);
        }
        self.verts.clear();
        self.indices.clear();
    }
}

impl Renderer for GLRenderer {
    fn metrics(&self) -> &dyn TextMetrics { &self.atlas }

    fn begin(&mut self, width: i32, height: i32, clr: Color) {
        self.width = width as u32;
        self.height = height as u32;
        let gl = &self.gl;
        unsafe {
            gl.viewport(0, 0, width, height);
            gl.clear_color(clr.r as f32 / 255.0, clr.g as f32 / 255.0, clr.b as f32 / 255.0, clr.a as f32 / 255.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
            debug_assert!(gl.get_error() == 0);
        }
    }

    fn fill_rect(&mut self, rect: Recti, color: Color) {
        self.bind(self.atlas_texture);
        let white = self.atlas.white_rect();
        // sample the middle texel so filtering never reaches the glyphs
        let cx = white.x as f32 + white.width as f32 / 2.0;
        let cy = white.y as f32 + white.height as f32 / 2.0;
        let (u, v) = (cx / self.atlas.width() as f32, cy / self.atlas.height() as f32);
        self.push_quad(rect, [u, v, u, v], color);
    }

    fn draw_texture(&mut self, id: TextureId, rect: Recti, tint: Color) {
        let Some(texture) = self.textures.get(&id).copied() else {
            return;
        };
        self.bind(texture);
        self.push_quad(rect, [0.0, 0.0, 1.0, 1.0], tint);
    }

    fn draw_text(&mut self, text: &str, pos: Vec2i, font_size: f32, color: Color) {
        self.bind(self.atlas_texture);
        let mut quads = Vec::with_capacity(text.len());
        self.atlas.walk_glyphs(text, pos, font_size, |dst, src| quads.push((dst, src)));
        for (dst, src) in quads {
            let uv = self.atlas_uv(src);
            self.push_quad(dst, uv, color);
        }
    }

    fn end(&mut self) { self.flush(); }

    fn create_texture(&mut self, id: TextureId, width: i32, height: i32, pixels: &[u8]) {
        match glow_common::upload_rgba(&self.gl, width, height, pixels, glow::LINEAR) {
            Ok(texture) => {
                self.textures.insert(id, texture);
            }
            Err(e) => log::warn!("texture {} upload failed: {}", id.raw(), e),
        }
    }

    fn destroy_texture(&mut self, id: TextureId) {
        if let Some(texture) = self.textures.remove(&id) {
            if self.bound == texture {
                self.flush();
                self.bound = self.atlas_texture;
            }
            unsafe { self.gl.delete_texture(texture) };
        }
    }
}

impl Drop for GLRenderer {
    fn drop(&mut self) {
        unsafe {
            for (_, texture) in self.textures.drain() {
                self.gl.delete_texture(texture);
            }
            self.gl.delete_texture(self.atlas_texture);
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_buffer(self.ibo);
            self.gl.delete_program(self.program);
        }
    }
}
