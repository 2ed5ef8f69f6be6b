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

/// Callback invoked when a button is clicked.
/// It runs synchronously inside [`Scene::handle_event`] and must not block.
pub type ClickCallback = Box<dyn FnMut()>;

#[derive(Clone, Debug)]
/// A line of text anchored inside its owning widget.
pub struct TextComponent {
    text: String,
    font_size: f32,
    alignment: Alignment,
    color: Color,
    position: Vec2i,
}

impl TextComponent {
    /// Creates a top-left aligned white label at the origin.
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            alignment: Alignment::TopLeft,
            color: color(255, 255, 255, 255),
            position: vec2(0, 0),
        }
    }

    /// Sets the anchor used when the label has a parent.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Sets the text color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Places the label at `position`.
    pub fn at(mut self, position: Vec2i) -> Self {
        self.position = position;
        self
    }

    /// Returns the label text.
    pub fn text(&self) -> &str { &self.text }

    /// Replaces the label text.
    pub fn set_text(&mut self, text: impl Into<String>) { self.text = text.into(); }

    /// Returns the font size in pixels.
    pub fn font_size(&self) -> f32 { self.font_size }

    /// Returns the anchor.
    pub fn alignment(&self) -> Alignment { self.alignment }

    /// Returns the stored position.
    pub fn position(&self) -> Vec2i { self.position }

    /// Translates the stored position.
    pub fn update_position(&mut self, dx: i32, dy: i32) {
        self.position.x += dx;
        self.position.y += dy;
    }

    /// Resolves where text measuring `size` is drawn. Without a parent the stored position is used as is.
    pub fn draw_position(&self, parent: Option<Recti>, size: Dimensioni) -> Vec2i {
        match parent {
            Some(parent) => {
                let offset = anchor_offset(size, Dimensioni::new(parent.width, parent.height), self.alignment);
                vec2(self.position.x + offset.x, self.position.y + offset.y)
            }
            None => self.position,
        }
    }

    /// Draws the label.
    pub fn draw<R: Renderer>(&self, parent: Option<Recti>, canvas: &mut Canvas<R>) {
        let pos = match parent {
            Some(_) => self.draw_position(parent, canvas.text_size(&self.text, self.font_size)),
            None => self.position,
        };
        canvas.draw_text(&self.text, pos, self.font_size, self.color);
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
/// Interaction state of a button.
pub enum ButtonState {
    /// Pointer elsewhere.
    #[default]
    Idle,
    /// Pointer over the button.
    Hovered,
    /// Left button held after pressing on the button.
    Pressed,
}

/// Clickable rectangle with an optional label and image.
pub struct ButtonComponent {
    position: Vec2i,
    size: Dimensioni,
    label: Option<TextComponent>,
    image: Option<TextureId>,
    style: ButtonStyle,
    on_click: Option<ClickCallback>,
    state: ButtonState,
}

impl ButtonComponent {
    /// Creates a button covering `bounds`.
    pub fn new(bounds: Recti, style: ButtonStyle) -> Self {
        Self {
            position: vec2(bounds.x, bounds.y),
            size: Dimensioni::new(bounds.width, bounds.height),
            label: None,
            image: None,
            style,
            on_click: None,
            state: ButtonState::Idle,
        }
    }

    /// Adds a label centered on the button. Empty text adds nothing.
    pub fn with_label(mut self, text: &str, font_size: f32, color: Color) -> Self {
        self.label = match text.is_empty() {
            true => None,
            false => Some(TextComponent::new(text, font_size).with_alignment(Alignment::Center).with_color(color).at(self.position)),
        };
        self
    }

    /// Draws `image` instead of the flat fill.
    pub fn with_image(mut self, image: Option<TextureId>) -> Self {
        self.image = image;
        self
    }

    /// Sets the click callback.
    pub fn on_click<F: FnMut() + 'static>(mut self, f: F) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    /// Returns the button rectangle.
    pub fn bounds(&self) -> Recti { rect(self.position.x, self.position.y, self.size.width, self.size.height) }

    /// Returns the label, if any.
    pub fn label(&self) -> Option<&TextComponent> { self.label.as_ref() }

    /// Returns the current interaction state.
    pub fn state(&self) -> ButtonState { self.state }

    /// Returns `true` if the button paints a texture.
    pub fn has_texture(&self) -> bool { self.image.is_some() }

    /// Half-open hit test: the right and bottom edges are outside.
    pub fn contains(&self, p: Vec2i) -> bool {
        p.x >= self.position.x && p.x < self.position.x + self.size.width && p.y >= self.position.y && p.y < self.position.y + self.size.height
    }

    /// Advances the state machine. Returns `true` when the event completed a click.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerMove { pos } => {
                if self.state != ButtonState::Pressed {
                    self.state = if self.contains(pos) { ButtonState::Hovered } else { ButtonState::Idle };
                }
                false
            }
            InputEvent::PointerDown { button, pos } if button.is_left() => {
                if self.contains(pos) {
                    self.state = ButtonState::Pressed;
                }
                false
            }
            InputEvent::PointerUp { button, pos } if button.is_left() => {
                let inside = self.contains(pos);
                let clicked = self.state == ButtonState::Pressed && inside;
                self.state = if inside { ButtonState::Hovered } else { ButtonState::Idle };
                if clicked {
                    if let Some(f) = self.on_click.as_mut() {
                        f();
                    }
                }
                clicked
            }
            _ => false,
        }
    }

    /// Translates the button and its label.
    pub fn update_position(&mut self, dx: i32, dy: i32) {
        self.position.x += dx;
        self.position.y += dy;
        if let Some(label) = self.label.as_mut() {
            label.update_position(dx, dy);
        }
    }

    /// Returns the fill matching the current state.
    pub fn fill_color(&self) -> Color {
        match self.state {
            ButtonState::Pressed => self.style.pressed,
            ButtonState::Hovered => self.style.hover,
            ButtonState::Idle => self.style.normal,
        }
    }

    /// Draws the button body and then its label.
    pub fn draw<R: Renderer>(&self, canvas: &mut Canvas<R>) {
        let bounds = self.bounds();
        match self.image {
            Some(image) => canvas.draw_image(image, bounds, color(255, 255, 255, 255)),
            None => canvas.fill_rect(bounds, self.fill_color()),
        }
        if let Some(label) = &self.label {
            label.draw(Some(bounds), canvas);
        }
    }
}

impl std::fmt::Debug for ButtonComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ButtonComponent")
            .field("position", &(self.position.x, self.position.y))
            .field("size", &(self.size.width, self.size.height))
            .field("label", &self.label.as_ref().map(|l| l.text()))
            .field("image", &self.image)
            .field("state", &self.state)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

#[derive(Debug)]
/// Drawable, event handling unit owned by a [`Widget`].
pub enum Component {
    /// Text label.
    Text(TextComponent),
    /// Clickable button.
    Button(ButtonComponent),
}

impl Component {
    /// Draws the component. `parent` is the owning widget's rectangle.
    pub fn draw<R: Renderer>(&self, parent: Option<Recti>, canvas: &mut Canvas<R>) {
        match self {
            Self::Text(text) => text.draw(parent, canvas),
            Self::Button(button) => button.draw(canvas),
        }
    }

    /// Feeds an input event. Returns `true` if a button click completed.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match self {
            Self::Text(_) => false,
            Self::Button(button) => button.handle_event(event),
        }
    }

    /// Translates the component.
    pub fn update_position(&mut self, dx: i32, dy: i32) {
        match self {
            Self::Text(text) => text.update_position(dx, dy),
            Self::Button(button) => button.update_position(dx, dy),
        }
    }

    /// Returns the stored position.
    pub fn position(&self) -> Vec2i {
        match self {
            Self::Text(text) => text.position(),
            Self::Button(button) => vec2(button.bounds().x, button.bounds().y),
        }
    }

    /// Returns the text component, if this is one.
    pub fn as_text(&self) -> Option<&TextComponent> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the button component, if this is one.
    pub fn as_button(&self) -> Option<&ButtonComponent> {
        match self {
            Self::Button(button) => Some(button),
            _ => None,
        }
    }
}

impl From<TextComponent> for Component {
    fn from(text: TextComponent) -> Self { Self::Text(text) }
}

impl From<ButtonComponent> for Component {
    fn from(button: ButtonComponent) -> Self { Self::Button(button) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_button() -> (ButtonComponent, Rc<Cell<u32>>) {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let button = ButtonComponent::new(rect(10, 10, 50, 20), ButtonStyle::default()).on_click(move || counter.set(counter.get() + 1));
        (button, clicks)
    }

    #[test]
    fn hover_follows_pointer() {
        let (mut b, _) = counting_button();
        b.handle_event(&InputEvent::motion(20, 15));
        assert_eq!(b.state(), ButtonState::Hovered);
        b.handle_event(&InputEvent::motion(200, 15));
        assert_eq!(b.state(), ButtonState::Idle);
    }

    #[test]
    fn hit_test_is_half_open() {
        let (b, _) = counting_button();
        assert!(b.contains(vec2(10, 10)));
        assert!(b.contains(vec2(59, 29)));
        assert!(!b.contains(vec2(60, 15)));
        assert!(!b.contains(vec2(20, 30)));
    }

    #[test]
    fn click_fires_once_per_press_release() {
        let (mut b, clicks) = counting_button();
        assert!(!b.handle_event(&InputEvent::down(MouseButton::LEFT, 20, 15)));
        assert_eq!(b.state(), ButtonState::Pressed);
        assert!(b.handle_event(&InputEvent::up(MouseButton::LEFT, 21, 16)));
        assert_eq!(clicks.get(), 1);
        assert_eq!(b.state(), ButtonState::Hovered);
        // a second release without a press does nothing
        assert!(!b.handle_event(&InputEvent::up(MouseButton::LEFT, 21, 16)));
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn release_outside_cancels() {
        let (mut b, clicks) = counting_button();
        b.handle_event(&InputEvent::down(MouseButton::LEFT, 20, 15));
        b.handle_event(&InputEvent::motion(300, 300));
        assert_eq!(b.state(), ButtonState::Pressed);
        assert!(!b.handle_event(&InputEvent::up(MouseButton::LEFT, 300, 300)));
        assert_eq!(clicks.get(), 0);
        assert_eq!(b.state(), ButtonState::Idle);
    }

    #[test]
    fn press_outside_then_release_inside_is_not_a_click() {
        let (mut b, clicks) = counting_button();
        b.handle_event(&InputEvent::down(MouseButton::LEFT, 0, 0));
        b.handle_event(&InputEvent::up(MouseButton::LEFT, 20, 15));
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn other_buttons_are_ignored() {
        let (mut b, clicks) = counting_button();
        b.handle_event(&InputEvent::down(MouseButton::RIGHT, 20, 15));
        assert_eq!(b.state(), ButtonState::Idle);
        b.handle_event(&InputEvent::up(MouseButton::RIGHT, 20, 15));
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn button_without_callback_still_reports_click() {
        let mut b = ButtonComponent::new(rect(0, 0, 10, 10), ButtonStyle::default());
        b.handle_event(&InputEvent::down(MouseButton::LEFT, 5, 5));
        assert!(b.handle_event(&InputEvent::up(MouseButton::LEFT, 5, 5)));
    }

    #[test]
    fn fill_tracks_state() {
        let style = ButtonStyle::default();
        let (mut b, _) = counting_button();
        assert_eq!(b.fill_color(), style.normal);
        b.handle_event(&InputEvent::motion(20, 15));
        assert_eq!(b.fill_color(), style.hover);
        b.handle_event(&InputEvent::down(MouseButton::LEFT, 20, 15));
        assert_eq!(b.fill_color(), style.pressed);
    }

    #[test]
    fn label_moves_with_button() {
        let mut b = ButtonComponent::new(rect(0, 0, 40, 20), ButtonStyle::default()).with_label("ok", 10.0, color(0, 0, 0, 255));
        b.update_position(5, 7);
        let bounds = b.bounds();
        assert_eq!((bounds.x, bounds.y), (5, 7));
        let label = b.label().unwrap().position();
        assert_eq!((label.x, label.y), (5, 7));
        b.update_position(0, 0);
        assert_eq!((b.bounds().x, b.bounds().y), (5, 7));
    }

    #[test]
    fn empty_label_is_dropped() {
        let b = ButtonComponent::new(rect(0, 0, 40, 20), ButtonStyle::default()).with_label("", 10.0, color(0, 0, 0, 255));
        assert!(b.label().is_none());
    }

    #[test]
    fn text_resolves_against_parent() {
        let metrics = MonospaceMetrics::default();
        let text = TextComponent::new("hi", 10.0).with_alignment(Alignment::Center).at(vec2(100, 100));
        // "hi" measures 10x10 inside a 100x50 parent
        let size = metrics.text_size(text.text(), text.font_size());
        let p = text.draw_position(Some(rect(100, 100, 100, 50)), size);
        assert_eq!((p.x, p.y), (145, 120));
        let raw = text.draw_position(None, size);
        assert_eq!((raw.x, raw.y), (100, 100));
    }

    #[test]
    fn button_draws_body_then_label() {
        let (handle, mut canvas) = recording_canvas();
        let b = ButtonComponent::new(rect(0, 0, 40, 20), ButtonStyle::default()).with_label("ok", 10.0, color(0, 0, 0, 255));
        Component::from(b).draw(None, &mut canvas);
        let calls = handle.scope(|r| r.calls.clone());
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], DrawCall::Fill { rect: (0, 0, 40, 20), .. }));
        assert_eq!(calls[1], DrawCall::Text { text: "ok".into(), pos: (15, 5), size: 10.0 });
    }

    #[test]
    fn image_button_draws_texture() {
        let (handle, mut canvas) = recording_canvas();
        let tex = canvas.load_texture_rgba(1, 1, &[255; 4]).unwrap();
        let b = ButtonComponent::new(rect(0, 0, 40, 20), ButtonStyle::default()).with_image(Some(tex));
        assert!(b.has_texture());
        b.draw(&mut canvas);
        let calls = handle.scope(|r| r.calls.clone());
        assert_eq!(calls, vec![DrawCall::Texture { id: tex.raw(), rect: (0, 0, 40, 20) }]);
    }
}
