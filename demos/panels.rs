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
#[path = "./common/mod.rs"]
mod common;

use common::*;
use env_logger::Env;
use svui::*;

const DEFAULT_FONT: &str = "assets/NORMAL.ttf";
const LAYOUT_FILE: &str = "panels.cfg";

fn build_scene(canvas: &mut Canvas<GLRenderer>, store: ConfigStore) -> Result<Scene, UiError> {
    let green = Scene::load_background(canvas, "assets/metalPanel_green.png");
    let blue = Scene::load_background(canvas, "assets/metalPanel_blue.png");

    let mut scene = Scene::new().with_config_store(store);
    scene.create_widget(WidgetId(1), rect(0, 0, 400, 400), WidgetOption::DRAGGABLE | WidgetOption::RESIZABLE, green)?;
    scene.text_aligned("Hello World", 32.0, Alignment::TopCenter)?;
    scene.button_at(rect(100, 300, 200, 60), "Click me", 24.0, None, || log::info!("Button Clicked!"))?;
    scene.end_widget();

    scene.create_widget(WidgetId(2), rect(400, 100, 200, 150), WidgetOption::DRAGGABLE, blue)?;
    scene.end_widget();

    // widgets can be reopened to append more components
    scene.begin_widget(WidgetId(2))?;
    scene.text_aligned("drag me", 20.0, Alignment::Center)?;
    scene.end_widget();

    let restored = scene.restore_layout();
    log::info!("restored {} widget positions from {}", restored, LAYOUT_FILE);
    Ok(scene)
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let font = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_FONT.to_string());
    let atlas = GlyphAtlas::from_font_file(&font, 32.0, 512).map_err(|e| e.to_string())?;

    let mut store = ConfigStore::new(LAYOUT_FILE);
    if let Err(e) = store.load() {
        log::warn!("ignoring unreadable layout file: {}", e);
    }

    let mut app = GlowApplication::new("svui panels", 1800, 900, atlas, |canvas| build_scene(canvas, store))?;
    app.event_loop()
}
