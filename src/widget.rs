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

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Edges of a widget rectangle.
    pub struct EdgeMask : u32 {
        /// Bottom edge.
        const BOTTOM = 8;
        /// Top edge.
        const TOP = 4;
        /// Right edge.
        const RIGHT = 2;
        /// Left edge.
        const LEFT = 1;
    }

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Result of feeding an event to a widget.
    pub struct Response : u32 {
        /// A button click completed.
        const CLICKED = 8;
        /// A drag or resize gesture ended.
        const RELEASED = 4;
        /// The widget geometry changed.
        const CHANGED = 2;
        /// The widget claimed the press and started a gesture.
        const CAPTURED = 1;
    }
}

impl EdgeMask {
    /// Maps widget options to the edges they enable.
    pub fn from_options(options: WidgetOption) -> Self {
        let mut edges = Self::empty();
        edges.set(Self::LEFT, options.contains(WidgetOption::RESIZABLE_LEFT));
        edges.set(Self::RIGHT, options.contains(WidgetOption::RESIZABLE_RIGHT));
        edges.set(Self::TOP, options.contains(WidgetOption::RESIZABLE_TOP));
        edges.set(Self::BOTTOM, options.contains(WidgetOption::RESIZABLE_BOTTOM));
        edges
    }

    /// Returns the pointer shape for these edges. Horizontal edges win on corners.
    pub fn cursor(&self) -> CursorKind {
        if self.intersects(Self::LEFT | Self::RIGHT) {
            CursorKind::SizeWE
        } else if self.intersects(Self::TOP | Self::BOTTOM) {
            CursorKind::SizeNS
        } else {
            CursorKind::Arrow
        }
    }

    /// Returns the enabled edges of `r` within `threshold` pixels of `p`.
    /// Points outside the closed rectangle are near no edge. On rectangles thinner than
    /// twice the threshold only the nearer of two opposite edges is kept, ties going to
    /// the right or bottom edge.
    pub fn near(r: Recti, p: Vec2i, threshold: i32, enabled: EdgeMask) -> Self {
        let mut edges = Self::empty();
        if p.x < r.x || p.x > r.x + r.width || p.y < r.y || p.y > r.y + r.height {
            return edges;
        }
        edges.set(Self::LEFT, p.x <= r.x + threshold);
        edges.set(Self::RIGHT, p.x >= r.x + r.width - threshold);
        edges.set(Self::TOP, p.y <= r.y + threshold);
        edges.set(Self::BOTTOM, p.y >= r.y + r.height - threshold);
        edges &= enabled;
        edges.keep_nearer(Self::LEFT, Self::RIGHT, p.x - r.x, r.x + r.width - p.x);
        edges.keep_nearer(Self::TOP, Self::BOTTOM, p.y - r.y, r.y + r.height - p.y);
        edges
    }

    fn keep_nearer(&mut self, low: Self, high: Self, to_low: i32, to_high: i32) {
        if self.contains(low | high) {
            self.remove(if to_low < to_high { high } else { low });
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
/// Drag gesture state.
pub enum DragState {
    /// Waiting for a press.
    #[default]
    Idle,
    /// Following the pointer.
    Dragging {
        /// Offset of the press from the widget origin.
        grab: Vec2i,
    },
}

#[derive(Copy, Clone, Debug, Default)]
/// Moves a widget with the pointer while the left button is held.
pub struct DragBehavior {
    state: DragState,
}

impl DragBehavior {
    /// Returns the current state.
    pub fn state(&self) -> DragState { self.state }

    /// Returns `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool { matches!(self.state, DragState::Dragging { .. }) }

    fn press(&mut self, origin: Vec2i, pos: Vec2i) {
        self.state = DragState::Dragging { grab: vec2(pos.x - origin.x, pos.y - origin.y) };
    }

    fn motion(&self, pos: Vec2i) -> Option<Vec2i> {
        match self.state {
            DragState::Dragging { grab } => Some(vec2(pos.x - grab.x, pos.y - grab.y)),
            DragState::Idle => None,
        }
    }

    fn release(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        was_dragging
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
/// Resize gesture state.
pub enum ResizeState {
    /// Waiting for a press near an enabled edge.
    #[default]
    Idle,
    /// Dragging the held edges.
    Resizing {
        /// Edges picked at press time.
        edges: EdgeMask,
        /// Last pointer position seen.
        last: (i32, i32),
    },
}

#[derive(Copy, Clone, Debug)]
struct ResizeBehavior {
    enabled: EdgeMask,
    state: ResizeState,
}

impl ResizeBehavior {
    fn press(&mut self, r: Recti, pos: Vec2i, threshold: i32) -> bool {
        let edges = EdgeMask::near(r, pos, threshold, self.enabled);
        if edges.is_empty() {
            return false;
        }
        self.state = ResizeState::Resizing { edges, last: (pos.x, pos.y) };
        true
    }

    /// Applies the pointer delta to `r` and returns how far its origin moved.
    fn motion(&mut self, r: &mut Recti, pos: Vec2i) -> Option<(i32, i32)> {
        let ResizeState::Resizing { edges, last } = self.state else {
            return None;
        };
        let (dx, dy) = (pos.x - last.0, pos.y - last.1);
        let mut moved = (0, 0);
        if edges.contains(EdgeMask::LEFT) {
            r.x += dx;
            r.width -= dx;
            moved.0 = dx;
        }
        if edges.contains(EdgeMask::RIGHT) {
            r.width += dx;
        }
        if edges.contains(EdgeMask::TOP) {
            r.y += dy;
            r.height -= dy;
            moved.1 = dy;
        }
        if edges.contains(EdgeMask::BOTTOM) {
            r.height += dy;
        }
        self.state = ResizeState::Resizing { edges, last: (pos.x, pos.y) };
        Some(moved)
    }

    fn held(&self) -> Option<EdgeMask> {
        match self.state {
            ResizeState::Resizing { edges, .. } => Some(edges),
            ResizeState::Idle => None,
        }
    }
}

#[derive(Debug)]
/// Rectangular panel owning an ordered list of components.
pub struct Widget {
    rect: Recti,
    id: WidgetId,
    background: Option<TextureId>,
    options: WidgetOption,
    components: Vec<Component>,
    drag: Option<DragBehavior>,
    resize: ResizeBehavior,
    hover_edges: EdgeMask,
}

impl Widget {
    /// Creates a widget. A drag behavior is attached when `options` contains `DRAGGABLE`.
    pub fn new(id: WidgetId, rect: Recti, options: WidgetOption, background: Option<TextureId>) -> Self {
        Self {
            rect,
            id,
            background,
            options,
            components: Vec::new(),
            drag: if options.is_draggable() { Some(DragBehavior::default()) } else { None },
            resize: ResizeBehavior { enabled: EdgeMask::from_options(options), state: ResizeState::Idle },
            hover_edges: EdgeMask::empty(),
        }
    }

    /// Returns the caller supplied id.
    pub fn id(&self) -> WidgetId { self.id }

    /// Returns the widget rectangle in scene coordinates.
    pub fn rect(&self) -> Recti { self.rect }

    /// Returns the background texture, if any.
    pub fn background(&self) -> Option<TextureId> { self.background }

    /// Returns the options the widget was created with.
    pub fn options(&self) -> WidgetOption { self.options }

    /// Returns the components in draw order.
    pub fn components(&self) -> &[Component] { &self.components }

    /// Returns the drag behavior of draggable widgets.
    pub fn drag(&self) -> Option<&DragBehavior> { self.drag.as_ref() }

    /// Returns the resize gesture state.
    pub fn resize_state(&self) -> ResizeState { self.resize.state }

    /// Appends a component.
    pub fn push_component(&mut self, component: Component) { self.components.push(component); }

    /// Strict hit test: points on the border are outside.
    pub fn contains(&self, p: Vec2i) -> bool {
        let r = self.rect;
        p.x > r.x && p.x < r.x + r.width && p.y > r.y && p.y < r.y + r.height
    }

    /// Moves the origin to `origin`, carrying every component along.
    pub fn move_to(&mut self, origin: Vec2i) {
        let (dx, dy) = (origin.x - self.rect.x, origin.y - self.rect.y);
        self.rect.x = origin.x;
        self.rect.y = origin.y;
        self.translate_components(dx, dy);
    }

    /// Replaces the geometry, carrying every component along with the origin.
    pub fn set_rect(&mut self, r: Recti) {
        self.move_to(vec2(r.x, r.y));
        self.rect.width = r.width;
        self.rect.height = r.height;
    }

    fn translate_components(&mut self, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        for c in &mut self.components {
            c.update_position(dx, dy);
        }
    }

    /// Returns the pointer shape this widget asks for, if any.
    pub fn cursor(&self) -> Option<CursorKind> {
        let edges = self.resize.held().unwrap_or(self.hover_edges);
        if edges.is_empty() { None } else { Some(edges.cursor()) }
    }

    /// Feeds an event to the components, then to the resize and drag logic.
    /// With `capture` false a press never starts a gesture.
    pub fn handle_event(&mut self, event: &InputEvent, style: &Style, capture: bool) -> Response {
        let mut response = Response::empty();
        for c in &mut self.components {
            if c.handle_event(event) {
                response |= Response::CLICKED;
            }
        }

        match *event {
            InputEvent::PointerDown { button, pos } if button.is_left() && capture => {
                if self.resize.press(self.rect, pos, style.edge_threshold) {
                    log::debug!("widget {} resize start {:?}", self.id, self.resize.held());
                    response |= Response::CAPTURED;
                } else if self.contains(pos) {
                    let origin = vec2(self.rect.x, self.rect.y);
                    if let Some(drag) = self.drag.as_mut() {
                        drag.press(origin, pos);
                        log::debug!("widget {} drag start", self.id);
                        response |= Response::CAPTURED;
                    }
                }
            }
            InputEvent::PointerMove { pos } => {
                if let Some((dx, dy)) = self.resize.motion(&mut self.rect, pos) {
                    self.translate_components(dx, dy);
                    response |= Response::CHANGED;
                } else if let Some(origin) = self.drag.as_ref().and_then(|d| d.motion(pos)) {
                    self.move_to(origin);
                    response |= Response::CHANGED;
                }
                self.hover_edges = match self.resize.held() {
                    Some(edges) => edges,
                    None => EdgeMask::near(self.rect, pos, style.edge_threshold, self.resize.enabled),
                };
            }
            InputEvent::PointerUp { button, .. } if button.is_left() => {
                let was_resizing = self.resize.held().is_some();
                self.resize.state = ResizeState::Idle;
                let was_dragging = self.drag.as_mut().is_some_and(|d| d.release());
                if was_resizing || was_dragging {
                    log::debug!("widget {} released at {:?}", self.id, (self.rect.x, self.rect.y, self.rect.width, self.rect.height));
                    response |= Response::RELEASED;
                }
            }
            _ => {}
        }
        response
    }

    /// Paints the background, then every component on top.
    pub fn draw<R: Renderer>(&self, canvas: &mut Canvas<R>, style: &Style) {
        match self.background {
            Some(texture) => canvas.draw_image(texture, self.rect, color(255, 255, 255, 255)),
            None => canvas.fill_rect(self.rect, style.widget_color),
        }
        for c in &self.components {
            c.draw(Some(self.rect), canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    fn panel(r: Recti, options: WidgetOption) -> Widget {
        let mut w = Widget::new(WidgetId(1), r, options, None);
        w.push_component(TextComponent::new("hi", 10.0).at(vec2(r.x, r.y)).into());
        w
    }

    fn geometry(w: &Widget) -> (i32, i32, i32, i32) {
        let r = w.rect();
        (r.x, r.y, r.width, r.height)
    }

    fn label_pos(w: &Widget) -> (i32, i32) {
        let p = w.components()[0].position();
        (p.x, p.y)
    }

    #[test]
    fn hit_test_is_strict() {
        let w = panel(rect(0, 0, 100, 100), WidgetOption::NONE);
        assert!(w.contains(vec2(1, 1)));
        assert!(w.contains(vec2(99, 99)));
        assert!(!w.contains(vec2(0, 50)));
        assert!(!w.contains(vec2(100, 50)));
        assert!(!w.contains(vec2(50, 100)));
    }

    #[test]
    fn drag_follows_net_pointer_motion() {
        let style = Style::default();
        let mut w = panel(rect(0, 0, 100, 100), WidgetOption::DRAGGABLE);
        let r = w.handle_event(&InputEvent::down(MouseButton::LEFT, 50, 50), &style, true);
        assert!(r.contains(Response::CAPTURED));
        w.handle_event(&InputEvent::motion(60, 55), &style, true);
        w.handle_event(&InputEvent::motion(70, 80), &style, true);
        let r = w.handle_event(&InputEvent::up(MouseButton::LEFT, 70, 80), &style, true);
        assert!(r.contains(Response::RELEASED));
        assert_eq!(geometry(&w), (20, 30, 100, 100));
        assert_eq!(label_pos(&w), (20, 30));
        assert!(!w.drag().unwrap().is_dragging());

        // released widgets stay put
        w.handle_event(&InputEvent::motion(0, 0), &style, true);
        assert_eq!(geometry(&w), (20, 30, 100, 100));
    }

    #[test]
    fn press_on_border_does_not_drag() {
        let style = Style::default();
        let mut w = panel(rect(0, 0, 100, 100), WidgetOption::DRAGGABLE);
        let r = w.handle_event(&InputEvent::down(MouseButton::LEFT, 0, 50), &style, true);
        assert!(r.is_empty());
        w.handle_event(&InputEvent::motion(30, 50), &style, true);
        assert_eq!(geometry(&w), (0, 0, 100, 100));
    }

    #[test]
    fn non_draggable_widget_ignores_presses() {
        let style = Style::default();
        let mut w = panel(rect(0, 0, 100, 100), WidgetOption::NONE);
        assert!(w.drag().is_none());
        assert!(w.handle_event(&InputEvent::down(MouseButton::LEFT, 50, 50), &style, true).is_empty());
    }

    #[test]
    fn uncaptured_press_starts_nothing() {
        let style = Style::default();
        let mut w = panel(rect(0, 0, 100, 100), WidgetOption::DRAGGABLE | WidgetOption::RESIZABLE);
        assert!(w.handle_event(&InputEvent::down(MouseButton::LEFT, 50, 50), &style, false).is_empty());
        assert!(w.handle_event(&InputEvent::down(MouseButton::LEFT, 2, 50), &style, false).is_empty());
        w.handle_event(&InputEvent::motion(40, 40), &style, true);
        assert_eq!(geometry(&w), (0, 0, 100, 100));
    }

    #[test]
    fn left_resize_keeps_right_edge() {
        let style = Style::default();
        let mut w = panel(rect(100, 100, 200, 100), WidgetOption::RESIZABLE);
        assert!(w.handle_event(&InputEvent::down(MouseButton::LEFT, 102, 150), &style, true).contains(Response::CAPTURED));
        w.handle_event(&InputEvent::motion(90, 150), &style, true);
        w.handle_event(&InputEvent::motion(130, 150), &style, true);
        let (x, _, width, _) = geometry(&w);
        assert_eq!(x + width, 300);
        assert_eq!(geometry(&w), (128, 100, 172, 100));
        assert_eq!(label_pos(&w), (128, 100));
    }

    #[test]
    fn right_and_bottom_resize_grow_size_only() {
        let style = Style::default();
        let mut w = panel(rect(100, 100, 200, 100), WidgetOption::RESIZABLE);
        w.handle_event(&InputEvent::down(MouseButton::LEFT, 298, 150), &style, true);
        w.handle_event(&InputEvent::motion(310, 150), &style, true);
        w.handle_event(&InputEvent::up(MouseButton::LEFT, 310, 150), &style, true);
        assert_eq!(geometry(&w), (100, 100, 212, 100));

        w.handle_event(&InputEvent::down(MouseButton::LEFT, 150, 199), &style, true);
        w.handle_event(&InputEvent::motion(150, 189), &style, true);
        assert_eq!(geometry(&w), (100, 100, 212, 90));
        assert_eq!(label_pos(&w), (100, 100));
    }

    #[test]
    fn top_resize_moves_origin() {
        let style = Style::default();
        let mut w = panel(rect(0, 50, 100, 100), WidgetOption::RESIZABLE_TOP);
        w.handle_event(&InputEvent::down(MouseButton::LEFT, 50, 55), &style, true);
        w.handle_event(&InputEvent::motion(50, 40), &style, true);
        assert_eq!(geometry(&w), (0, 35, 100, 115));
        assert_eq!(label_pos(&w), (0, 35));
    }

    #[test]
    fn top_left_corner_pins_bottom_right() {
        let style = Style::default();
        let mut w = panel(rect(100, 100, 200, 100), WidgetOption::RESIZABLE);
        w.handle_event(&InputEvent::down(MouseButton::LEFT, 103, 104), &style, true);
        assert_eq!(w.resize_state(), ResizeState::Resizing { edges: EdgeMask::LEFT | EdgeMask::TOP, last: (103, 104) });

        w.handle_event(&InputEvent::motion(83, 94), &style, true);
        assert_eq!(geometry(&w), (80, 90, 220, 110));
        assert_eq!(label_pos(&w), (80, 90));

        w.handle_event(&InputEvent::motion(113, 124), &style, true);
        let (x, y, width, height) = geometry(&w);
        assert_eq!((x + width, y + height), (300, 200));
        assert_eq!(geometry(&w), (110, 120, 190, 80));
        assert_eq!(label_pos(&w), (110, 120));
    }

    #[test]
    fn thin_widget_picks_nearer_edge() {
        let style = Style::default();
        let mut w = panel(rect(0, 0, 100, 16), WidgetOption::DRAGGABLE | WidgetOption::RESIZABLE);
        // equidistant from top and bottom
        w.handle_event(&InputEvent::down(MouseButton::LEFT, 50, 8), &style, true);
        assert_eq!(w.resize_state(), ResizeState::Resizing { edges: EdgeMask::BOTTOM, last: (50, 8) });
        w.handle_event(&InputEvent::motion(60, 18), &style, true);
        assert_eq!(geometry(&w), (0, 0, 100, 26));
        w.handle_event(&InputEvent::up(MouseButton::LEFT, 60, 18), &style, true);

        let mut w = panel(rect(0, 0, 15, 100), WidgetOption::RESIZABLE_LEFT | WidgetOption::RESIZABLE_RIGHT);
        w.handle_event(&InputEvent::down(MouseButton::LEFT, 9, 50), &style, true);
        w.handle_event(&InputEvent::motion(29, 50), &style, true);
        assert_eq!(geometry(&w), (0, 0, 35, 100));

        let mut w = panel(rect(0, 0, 15, 100), WidgetOption::RESIZABLE_LEFT | WidgetOption::RESIZABLE_RIGHT);
        w.handle_event(&InputEvent::down(MouseButton::LEFT, 4, 50), &style, true);
        w.handle_event(&InputEvent::motion(0, 50), &style, true);
        assert_eq!(geometry(&w), (-4, 0, 19, 100));
        assert_eq!(label_pos(&w), (-4, 0));
    }

    #[test]
    fn near_keeps_single_opposite_edge() {
        let thin = rect(0, 0, 15, 15);
        let all = EdgeMask::all();
        assert_eq!(EdgeMask::near(thin, vec2(3, 12), 10, all), EdgeMask::LEFT | EdgeMask::BOTTOM);
        assert_eq!(EdgeMask::near(thin, vec2(12, 3), 10, all), EdgeMask::RIGHT | EdgeMask::TOP);
        // only the enabled edge competes
        assert_eq!(EdgeMask::near(thin, vec2(9, 7), 10, EdgeMask::LEFT), EdgeMask::LEFT);
    }

    #[test]
    fn disabled_edges_do_not_resize() {
        let style = Style::default();
        let mut w = panel(rect(100, 100, 200, 100), WidgetOption::RESIZABLE_RIGHT);
        assert!(w.handle_event(&InputEvent::down(MouseButton::LEFT, 102, 150), &style, true).is_empty());
        w.handle_event(&InputEvent::motion(80, 150), &style, true);
        assert_eq!(geometry(&w), (100, 100, 200, 100));
        assert_eq!(w.resize_state(), ResizeState::Idle);
    }

    #[test]
    fn resize_wins_over_drag() {
        let style = Style::default();
        let mut w = panel(rect(0, 0, 100, 100), WidgetOption::DRAGGABLE | WidgetOption::RESIZABLE);
        w.handle_event(&InputEvent::down(MouseButton::LEFT, 95, 50), &style, true);
        assert!(!w.drag().unwrap().is_dragging());
        w.handle_event(&InputEvent::motion(105, 60), &style, true);
        assert_eq!(geometry(&w), (0, 0, 110, 100));
    }

    #[test]
    fn hover_near_edges_requests_cursor() {
        let style = Style::default();
        let mut w = panel(rect(0, 0, 100, 100), WidgetOption::RESIZABLE);
        w.handle_event(&InputEvent::motion(50, 50), &style, true);
        assert_eq!(w.cursor(), None);
        w.handle_event(&InputEvent::motion(97, 50), &style, true);
        assert_eq!(w.cursor(), Some(CursorKind::SizeWE));
        w.handle_event(&InputEvent::motion(50, 95), &style, true);
        assert_eq!(w.cursor(), Some(CursorKind::SizeNS));
        w.handle_event(&InputEvent::motion(150, 95), &style, true);
        assert_eq!(w.cursor(), None);
    }

    #[test]
    fn cursor_is_held_while_resizing() {
        let style = Style::default();
        let mut w = panel(rect(0, 0, 100, 100), WidgetOption::RESIZABLE_RIGHT);
        w.handle_event(&InputEvent::down(MouseButton::LEFT, 98, 50), &style, true);
        w.handle_event(&InputEvent::motion(300, 50), &style, true);
        assert_eq!(w.cursor(), Some(CursorKind::SizeWE));
    }

    #[test]
    fn set_rect_carries_components() {
        let mut w = panel(rect(0, 0, 100, 100), WidgetOption::NONE);
        w.set_rect(rect(30, 40, 50, 60));
        assert_eq!(geometry(&w), (30, 40, 50, 60));
        assert_eq!(label_pos(&w), (30, 40));
    }

    #[test]
    fn draws_fallback_fill_under_components() {
        let (handle, mut canvas) = recording_canvas();
        let style = Style::default();
        let w = panel(rect(0, 0, 100, 100), WidgetOption::NONE);
        w.draw(&mut canvas, &style);
        let calls = handle.scope(|r| r.calls.clone());
        assert_eq!(calls[0], DrawCall::Fill { rect: (0, 0, 100, 100), color: style.widget_color });
        assert_eq!(text_calls(&handle), vec![("hi".to_string(), (0, 0))]);
    }
}
