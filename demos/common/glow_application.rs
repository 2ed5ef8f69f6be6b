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
use svui::*;

use std::sync::Arc;

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::mouse::{Cursor, SystemCursor};
use sdl2::video::{GLContext, GLProfile, Window};
use sdl2::{Sdl, VideoSubsystem};

/// SDL2 window with a GLES context driving one [`Scene`].
/// Fields drop in order, so GL resources go before the context.
pub struct GlowApplication {
    scene: Scene,
    canvas: Canvas<GLRenderer>,
    gl_ctx: GLContext,
    window: Window,
    _sdl_vid: VideoSubsystem,
    sdl_ctx: Sdl,
}

fn map_mouse_button(sdl_mb: sdl2::mouse::MouseButton) -> MouseButton {
    match sdl_mb {
        sdl2::mouse::MouseButton::Left => MouseButton::LEFT,
        sdl2::mouse::MouseButton::Right => MouseButton::RIGHT,
        sdl2::mouse::MouseButton::Middle => MouseButton::MIDDLE,
        _ => MouseButton::NONE,
    }
}

fn map_event(event: &Event) -> Option<InputEvent> {
    match *event {
        Event::Quit { .. } | Event::KeyDown { keycode: Some(Keycode::Escape), .. } => Some(InputEvent::Quit),
        Event::Window { win_event: WindowEvent::Close, .. } => Some(InputEvent::Quit),
        Event::MouseMotion { x, y, .. } => Some(InputEvent::motion(x, y)),
        Event::MouseButtonDown { x, y, mouse_btn, .. } => Some(InputEvent::down(map_mouse_button(mouse_btn), x, y)),
        Event::MouseButtonUp { x, y, mouse_btn, .. } => Some(InputEvent::up(map_mouse_button(mouse_btn), x, y)),
        _ => None,
    }
}

fn system_cursor(kind: CursorKind) -> SystemCursor {
    match kind {
        CursorKind::Arrow => SystemCursor::Arrow,
        CursorKind::SizeWE => SystemCursor::SizeWE,
        CursorKind::SizeNS => SystemCursor::SizeNS,
    }
}

impl GlowApplication {
    /// Opens the window and builds the scene with `init_scene`, which may load textures through the canvas.
    pub fn new<F: FnOnce(&mut Canvas<GLRenderer>) -> Result<Scene, UiError>>(
        title: &str,
        width: u32,
        height: u32,
        atlas: GlyphAtlas,
        init_scene: F,
    ) -> Result<Self, String> {
        let sdl_ctx = sdl2::init()?;
        let video = sdl_ctx.video()?;

        let gl_attr = video.gl_attr();
        gl_attr.set_context_profile(GLProfile::GLES);
        gl_attr.set_context_version(3, 0);

        let window = video.window(title, width, height).resizable().opengl().build().map_err(|e| e.to_string())?;
        let gl_ctx = window.gl_create_context()?;
        window.gl_make_current(&gl_ctx)?;
        let gl = unsafe { glow::Context::from_loader_function(|s| video.gl_get_proc_address(s) as *const _) };

        let (width, height) = window.size();
        let renderer = GLRenderer::new(Arc::new(gl), atlas, width, height)?;
        let mut canvas = Canvas::from(RendererHandle::new(renderer), Dimensioni::new(width as _, height as _));
        let scene = init_scene(&mut canvas).map_err(|e| e.to_string())?;
        log::info!("scene ready with {} widgets", scene.widgets().len());

        Ok(Self { scene, canvas, gl_ctx, window, _sdl_vid: video, sdl_ctx })
    }

    /// Pumps events into the scene and redraws it until the window closes.
    pub fn event_loop(&mut self) -> Result<(), String> {
        self.window.gl_make_current(&self.gl_ctx)?;
        let mut event_pump = self.sdl_ctx.event_pump()?;
        let mut active_cursor: Option<Cursor> = None;

        'running: loop {
            for event in event_pump.poll_iter() {
                let Some(input) = map_event(&event) else {
                    continue;
                };
                self.scene.handle_event(&input);
                if let InputEvent::Quit = input {
                    break 'running;
                }
            }

            if let Some(kind) = self.scene.take_cursor_change() {
                match Cursor::from_system(system_cursor(kind)) {
                    Ok(cursor) => {
                        cursor.set();
                        active_cursor = Some(cursor);
                    }
                    Err(e) => log::warn!("cursor {:?} unavailable: {}", kind, e),
                }
            }

            let (width, height) = self.window.size();
            self.canvas.begin(width as i32, height as i32, color(0, 0, 0, 255));
            self.scene.draw(&mut self.canvas);
            self.canvas.end();
            self.window.gl_swap_window();

            ::std::thread::sleep(::std::time::Duration::new(0, 1_000_000_000u32 / 60));
        }
        drop(active_cursor);
        Ok(())
    }

    /// Returns the scene.
    pub fn scene(&self) -> &Scene { &self.scene }
}
