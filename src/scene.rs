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
use std::collections::HashSet;

/// Owner of every widget. Widgets are drawn and receive events in insertion order.
///
/// Widgets are assembled with a small builder protocol:
///
/// ```
/// use svui::*;
///
/// let mut scene = Scene::new();
/// scene.create_widget(WidgetId(1), rect(0, 0, 400, 400), WidgetOption::DRAGGABLE, None).unwrap();
/// scene.text("Hello World", 24.0).unwrap();
/// scene.button("Ok", 16.0, None, || println!("clicked")).unwrap();
/// scene.end_widget();
/// assert_eq!(scene.widgets().len(), 1);
/// ```
///
/// Construction calls made out of order are logged, return an error and leave the scene untouched.
pub struct Scene {
    widgets: Vec<Widget>,
    current: Option<usize>,
    building: bool,
    style: Style,
    config: Option<ConfigStore>,
    cursor: CursorKind,
    pending_cursor: Option<CursorKind>,
}

impl Default for Scene {
    fn default() -> Self { Self::new() }
}

impl Scene {
    /// Creates an empty scene with the default style.
    pub fn new() -> Self { Self::with_style(Style::default()) }

    /// Creates an empty scene with `style`.
    pub fn with_style(style: Style) -> Self {
        Self {
            widgets: Vec::new(),
            current: None,
            building: false,
            style,
            config: None,
            cursor: CursorKind::Arrow,
            pending_cursor: None,
        }
    }

    /// Attaches a store used to persist widget geometry.
    pub fn with_config_store(mut self, store: ConfigStore) -> Self {
        self.config = Some(store);
        self
    }

    /// Returns the attached config store.
    pub fn config_store(&self) -> Option<&ConfigStore> { self.config.as_ref() }

    /// Returns the attached config store for modification.
    pub fn config_store_mut(&mut self) -> Option<&mut ConfigStore> { self.config.as_mut() }

    /// Returns the style.
    pub fn style(&self) -> &Style { &self.style }

    /// Returns the style for modification. Existing buttons keep the colors they were built with.
    pub fn style_mut(&mut self) -> &mut Style { &mut self.style }

    /// Returns `true` between [`Scene::create_widget`] and [`Scene::end_widget`].
    pub fn is_building(&self) -> bool { self.building }

    /// Appends a widget and makes it current.
    pub fn create_widget(&mut self, id: WidgetId, rect: Recti, options: WidgetOption, background: Option<TextureId>) -> Result<(), UiError> {
        if self.building {
            return Err(usage(UiError::AlreadyBuilding));
        }
        self.widgets.push(Widget::new(id, rect, options, background));
        self.current = Some(self.widgets.len() - 1);
        self.building = true;
        Ok(())
    }

    /// Makes the first widget with `id` current so more components can be appended.
    pub fn begin_widget(&mut self, id: WidgetId) -> Result<(), UiError> {
        match self.widgets.iter().position(|w| w.id() == id) {
            Some(index) => {
                self.current = Some(index);
                Ok(())
            }
            None => Err(usage(UiError::WidgetNotFound(id))),
        }
    }

    /// Adds a label centered on the current widget.
    pub fn text(&mut self, text: &str, size: f32) -> Result<(), UiError> { self.text_aligned(text, size, Alignment::Center) }

    /// Adds a label anchored on the current widget.
    pub fn text_aligned(&mut self, text: &str, size: f32, alignment: Alignment) -> Result<(), UiError> {
        let size = self.font_size(size);
        let text_color = self.style.text_color;
        let widget = self.current_widget()?;
        let origin = vec2(widget.rect().x, widget.rect().y);
        widget.push_component(TextComponent::new(text, size).with_alignment(alignment).with_color(text_color).at(origin).into());
        Ok(())
    }

    /// Adds a button covering the whole current widget.
    pub fn button<F: FnMut() + 'static>(&mut self, text: &str, size: f32, image: Option<TextureId>, on_click: F) -> Result<(), UiError> {
        let bounds = self.current_widget()?.rect();
        self.push_button(bounds, text, size, image, on_click)
    }

    /// Adds a button at `local`, relative to the current widget origin.
    pub fn button_at<F: FnMut() + 'static>(&mut self, local: Recti, text: &str, size: f32, image: Option<TextureId>, on_click: F) -> Result<(), UiError> {
        let r = self.current_widget()?.rect();
        self.push_button(rect(r.x + local.x, r.y + local.y, local.width, local.height), text, size, image, on_click)
    }

    fn push_button<F: FnMut() + 'static>(&mut self, bounds: Recti, text: &str, size: f32, image: Option<TextureId>, on_click: F) -> Result<(), UiError> {
        let size = self.font_size(size);
        let (button_style, text_color) = (self.style.button, self.style.text_color);
        let button = ButtonComponent::new(bounds, button_style).with_label(text, size, text_color).with_image(image).on_click(on_click);
        self.current_widget()?.push_component(button.into());
        Ok(())
    }

    /// Ends the current build. Always succeeds.
    pub fn end_widget(&mut self) {
        self.current = None;
        self.building = false;
    }

    fn current_widget(&mut self) -> Result<&mut Widget, UiError> {
        match self.current.and_then(|i| self.widgets.get_mut(i)) {
            Some(w) => Ok(w),
            None => Err(usage(UiError::NoCurrentWidget)),
        }
    }

    fn font_size(&self, size: f32) -> f32 {
        if size > 0.0 {
            size
        } else {
            self.style.default_font_size
        }
    }

    /// Returns the first widget with `id`.
    pub fn widget(&self, id: WidgetId) -> Option<&Widget> { self.widgets.iter().find(|w| w.id() == id) }

    /// Returns the first widget with `id` for modification.
    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget> { self.widgets.iter_mut().find(|w| w.id() == id) }

    /// Returns every widget in draw order.
    pub fn widgets(&self) -> &[Widget] { &self.widgets }

    /// Dispatches an event to every widget in order.
    ///
    /// Only the first widget that claims a press starts a gesture; the rest still see the event.
    /// Claiming follows insertion order, so where panels overlap the one drawn underneath wins.
    /// When a drag or resize ends and a config store is attached, the layout is saved.
    pub fn handle_event(&mut self, event: &InputEvent) -> Response {
        if let InputEvent::Quit = event {
            return Response::empty();
        }

        let mut response = Response::empty();
        let mut capture = true;
        for w in &mut self.widgets {
            let r = w.handle_event(event, &self.style, capture);
            if r.contains(Response::CAPTURED) {
                capture = false;
            }
            response |= r;
        }

        if !matches!(event, InputEvent::PointerDown { .. }) {
            let resizing = self.widgets.iter().find(|w| w.resize_state() != ResizeState::Idle);
            let owner = resizing.or_else(|| self.widgets.iter().find(|w| w.cursor().is_some()));
            let cursor = owner.and_then(Widget::cursor).unwrap_or(CursorKind::Arrow);
            if cursor != self.cursor {
                self.cursor = cursor;
                self.pending_cursor = Some(cursor);
            }
        }

        if response.contains(Response::RELEASED) && self.config.is_some() {
            if let Err(e) = self.persist_layout() {
                log::warn!("failed to persist layout: {}", e);
            }
        }
        response
    }

    /// Returns the cursor the scene currently asks for.
    pub fn cursor(&self) -> CursorKind { self.cursor }

    /// Returns the requested cursor if it changed since the last call.
    pub fn take_cursor_change(&mut self) -> Option<CursorKind> { self.pending_cursor.take() }

    /// Paints every widget in order.
    pub fn draw<R: Renderer>(&self, canvas: &mut Canvas<R>) {
        for w in &self.widgets {
            w.draw(canvas, &self.style);
        }
    }

    /// Writes every widget's geometry to the config store and saves it.
    /// Widgets sharing an id are stored once, from the first of them.
    pub fn persist_layout(&mut self) -> Result<(), UiError> {
        let Some(store) = self.config.as_mut() else {
            return Ok(());
        };
        let mut seen = HashSet::new();
        for w in &self.widgets {
            if !seen.insert(w.id()) {
                continue;
            }
            let r = w.rect();
            store.save_component_config(&layout_key(w.id()), &[r.x, r.y, r.width, r.height].map(|v| v.to_string()));
        }
        log::debug!("persisting layout of {} widgets", seen.len());
        store.save()
    }

    /// Applies stored geometry to the first widget of each id. Returns how many widgets moved.
    pub fn restore_layout(&mut self) -> usize {
        let Some(store) = self.config.as_ref() else {
            return 0;
        };
        let mut seen = HashSet::new();
        let mut restored = 0;
        for w in &mut self.widgets {
            if !seen.insert(w.id()) {
                continue;
            }
            let key = layout_key(w.id());
            let Some(raw) = store.get(&key) else {
                continue;
            };
            match parse_rect(raw) {
                Some(r) => {
                    w.set_rect(r);
                    restored += 1;
                }
                None => log::warn!("ignoring malformed layout entry {}={}", key, raw),
            }
        }
        restored
    }

    /// Loads a background image, falling back to `None` (flat fill) when it cannot be read.
    #[cfg(any(feature = "builder", feature = "png_source"))]
    pub fn load_background<R: Renderer, P: AsRef<std::path::Path>>(canvas: &mut Canvas<R>, path: P) -> Option<TextureId> {
        match canvas.load_texture_file(path.as_ref()) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("background {} unavailable, using flat color: {}", path.as_ref().display(), e);
                None
            }
        }
    }
}

fn usage(e: UiError) -> UiError {
    log::warn!("{}", e);
    e
}

fn layout_key(id: WidgetId) -> String { format!("widget.{}", id) }

fn parse_rect(raw: &str) -> Option<Recti> {
    let values: Vec<i32> = decode_list(raw).iter().map(|v| v.trim().parse().ok()).collect::<Option<_>>()?;
    match values[..] {
        [x, y, w, h] => Some(rect(x, y, w, h)),
        _ => None,
    }
}
