use std::collections::HashMap;

use ductus_engine::input::{Key, KeyAction};
use ductus_engine::paint::Color;
use ductus_engine::scene::DrawList;

use crate::events::{ClickOutcome, DragGesture, KeyboardEvents, PointerEvents};
use crate::geom::{Point, Viewport};
use crate::observer::{Flow, ListenerId};
use crate::scene::{Scene, ShapeId};
use crate::shapes::{
    BresenhamLine, DrawCtx, KeyRole, Line, Polygon, ScanlinePolygon, Shape,
};

/// Sketch-wide settings applied to newly spawned shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct SketchConfig {
    pub default_color: Color,
    /// Key that locks a scanline polygon.
    pub finalize_key: Key,
    /// Initial fill-density multiplier of scanline polygons.
    pub density: f32,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            default_color: Color::WHITE,
            finalize_key: Key::F,
            density: 1.0,
        }
    }
}

/// Shape kind spawned by the next click on empty ground.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Tool {
    Line,
    Bresenham,
    Triangle,
    Quad,
    Pentagon,
    Hexagon,
    Scanline,
}

impl Tool {
    /// N-gon tool for `sides` in `3..=6`.
    pub fn polygon(sides: u8) -> Option<Tool> {
        match sides {
            3 => Some(Tool::Triangle),
            4 => Some(Tool::Quad),
            5 => Some(Tool::Pentagon),
            6 => Some(Tool::Hexagon),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Line => "line",
            Tool::Bresenham => "bresenham line",
            Tool::Triangle => "triangle",
            Tool::Quad => "quad",
            Tool::Pentagon => "pentagon",
            Tool::Hexagon => "hexagon",
            Tool::Scanline => "scanline polygon",
        }
    }

    fn build(self, at: Point, config: &SketchConfig) -> Box<dyn Shape> {
        let color = config.default_color;
        match self {
            Tool::Line => Box::new(Line::new(at, color)),
            Tool::Bresenham => Box::new(BresenhamLine::new(at, color)),
            Tool::Triangle => Box::new(Polygon::<3>::new(at, color)),
            Tool::Quad => Box::new(Polygon::<4>::new(at, color)),
            Tool::Pentagon => Box::new(Polygon::<5>::new(at, color)),
            Tool::Hexagon => Box::new(Polygon::<6>::new(at, color)),
            Tool::Scanline => Box::new(ScanlinePolygon::new(
                at,
                color,
                config.finalize_key,
                config.density,
            )),
        }
    }
}

/// Drag-gesture listener handle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GestureTarget {
    pub shape: ShapeId,
}

/// Keyboard listener handle: one per shape and role.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyBinding {
    pub shape: ShapeId,
    pub role: KeyRole,
}

/// Resolves a handle against the scene; handles whose shape is gone detach.
fn route<F>(scene: &mut Scene, id: ShapeId, f: F) -> Flow
where
    F: FnOnce(&mut (dyn Shape + 'static)) -> Flow,
{
    match scene.get_mut(id) {
        Some(shape) => f(shape),
        None => Flow::Detach,
    }
}

/// Listener ids registered for one shape; removal detaches exactly these.
#[derive(Debug, Default)]
struct Registration {
    gesture: Option<ListenerId>,
    keyboard: Vec<ListenerId>,
    pointer: Option<ListenerId>,
}

/// Sketch context: shape arena, shared drag gesture and listener registries.
///
/// All entry points take positions in NDC. Events are routed synchronously,
/// in listener registration order, before the entry point returns.
pub struct Sketch {
    config: SketchConfig,
    scene: Scene,

    gesture: DragGesture<GestureTarget>,
    keyboard: KeyboardEvents<KeyBinding>,
    pointer: PointerEvents<ShapeId>,
    registrations: HashMap<ShapeId, Registration>,

    tool: Option<Tool>,
    viewport: Viewport,
}

impl Default for Sketch {
    fn default() -> Self {
        Self::new(SketchConfig::default())
    }
}

impl Sketch {
    pub fn new(config: SketchConfig) -> Self {
        Self {
            config,
            scene: Scene::new(),
            gesture: DragGesture::new(),
            keyboard: KeyboardEvents::new(),
            pointer: PointerEvents::new(),
            registrations: HashMap::new(),
            tool: None,
            viewport: Viewport::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    /// Arms `tool` for the next gesture. `None` disarms.
    ///
    /// A shape already under construction keeps its kind.
    pub fn set_tool(&mut self, tool: Option<Tool>) {
        if self.tool != tool {
            log::debug!("tool: {}", tool.map_or("none", Tool::label));
        }
        self.tool = tool;
    }

    #[inline]
    pub fn tool(&self) -> Option<Tool> {
        self.tool
    }

    /// Logical window size used for pixel-space drawing.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport.is_valid() {
            self.viewport = viewport;
        }
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn gesture(&self) -> &DragGesture<GestureTarget> {
        &self.gesture
    }

    #[inline]
    pub fn keyboard(&self) -> &KeyboardEvents<KeyBinding> {
        &self.keyboard
    }

    #[inline]
    pub fn pointer(&self) -> &PointerEvents<ShapeId> {
        &self.pointer
    }

    /// Adds a shape of kind `tool` at `at` and registers its listeners.
    pub fn spawn(&mut self, tool: Tool, at: Point) -> ShapeId {
        let shape = tool.build(at, &self.config);
        let roles = shape.key_roles();
        let id = self.scene.push(shape);

        let registration = Registration {
            gesture: Some(self.gesture.add_listener(GestureTarget { shape: id })),
            keyboard: roles
                .iter()
                .map(|&role| self.keyboard.add_listener(KeyBinding { shape: id, role }))
                .collect(),
            pointer: Some(self.pointer.add_listener(id)),
        };
        self.registrations.insert(id, registration);

        log::debug!("spawned {} {id} at ({:.3}, {:.3})", tool.label(), at.x, at.y);
        id
    }

    /// Pointer moved to `p`.
    pub fn pointer_moved(&mut self, p: Point) {
        let scene = &mut self.scene;
        self.pointer
            .moved(p, |id, ev| route(scene, *id, |s| s.on_pointer(ev)));
        self.gesture.move_to(p, |t, ev| {
            route(scene, t.shape, |s| s.on_gesture(ev));
        });
    }

    /// Primary button transition at `p`.
    ///
    /// A press while idle spawns a shape of the armed tool and starts the
    /// gesture; presses while tracking finalize the current segment. Returns
    /// `None` when the press was not turned into a click.
    pub fn pointer_button(&mut self, p: Point, pressed: bool) -> Option<ClickOutcome> {
        {
            let scene = &mut self.scene;
            self.pointer
                .button(p, pressed, |id, ev| route(scene, *id, |s| s.on_pointer(ev)));
        }
        if !pressed {
            return None;
        }

        if self.gesture.is_tracking() && self.gesture.listener_count() == 0 {
            self.gesture.reset();
        }
        if !self.gesture.is_tracking() {
            let tool = self.tool?;
            self.spawn(tool, p);
        }

        let scene = &mut self.scene;
        let outcome = self
            .gesture
            .click(p, |t, ev| route(scene, t.shape, |s| s.on_gesture(ev)));
        log::trace!("click at ({:.3}, {:.3}): {outcome:?}", p.x, p.y);
        Some(outcome)
    }

    /// Key transition. Repeats are ignored.
    pub fn key(&mut self, key: Key, action: KeyAction) -> usize {
        let scene = &mut self.scene;
        self.keyboard.key(key, action, |b, key, released| {
            route(scene, b.shape, |s| s.on_key(b.role, key, released))
        })
    }

    /// Removes a shape together with every listener registered for it.
    pub fn remove(&mut self, id: ShapeId) -> Option<Box<dyn Shape>> {
        let shape = self.scene.remove(id)?;

        // Ids that already detached themselves resolve to nothing.
        let reg = self.registrations.remove(&id).unwrap_or_default();
        if let Some(lid) = reg.gesture {
            self.gesture.listeners_mut().detach(lid);
        }
        for lid in reg.keyboard {
            self.keyboard.listeners_mut().detach(lid);
        }
        if let Some(lid) = reg.pointer {
            self.pointer.listeners_mut().detach(lid);
        }

        if self.gesture.is_tracking() && self.gesture.listener_count() == 0 {
            self.gesture.reset();
        }
        log::debug!("removed {} {id}", shape.name());
        Some(shape)
    }

    /// Drops every shape and listener and returns the gesture to idle.
    pub fn clear(&mut self) {
        self.scene.clear();
        self.registrations.clear();
        self.gesture.listeners_mut().detach_where(|_| true);
        self.keyboard.listeners_mut().detach_where(|_| true);
        self.pointer.listeners_mut().detach_where(|_| true);
        self.gesture.reset();
        log::debug!("sketch cleared");
    }

    pub fn toggle_visibility(&mut self, id: ShapeId) -> Option<bool> {
        self.scene.toggle_visibility(id)
    }

    /// Topmost visible shape containing `p`.
    pub fn hit_test(&self, p: Point) -> Option<ShapeId> {
        self.scene
            .visible_top_down()
            .find(|(_, s)| s.is_inside(p))
            .map(|(id, _)| id)
    }

    /// Records every visible shape into `out`.
    pub fn draw(&self, out: &mut DrawList) {
        self.scene.draw(&DrawCtx::new(self.viewport), out);
    }
}
