use ductus_engine::coords::{Vec2, Viewport};
use ductus_engine::core::{App, AppControl, FrameCtx, WindowCtx};
use ductus_engine::input::{InputEvent, Key, KeyAction, MouseButton};
use ductus_engine::paint::Color;
use ductus_engine::render::shapes::PrimitiveRenderer;
use ductus_engine::scene::DrawList;
use ductus_sketch::{Sketch, Tool};

use crate::config::StudioConfig;

/// Studio-level action bound to a key press.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    Arm(Tool),
    Clear,
    ToggleNewest,
    RemoveNewest,
    Exit,
}

impl Command {
    pub fn for_key(key: Key) -> Option<Command> {
        let cmd = match key {
            Key::L => Command::Arm(Tool::Line),
            Key::K => Command::Arm(Tool::Bresenham),
            Key::S => Command::Arm(Tool::Scanline),
            Key::C => Command::Clear,
            Key::H => Command::ToggleNewest,
            Key::Backspace | Key::Delete => Command::RemoveNewest,
            Key::Escape => Command::Exit,
            other => Command::Arm(Tool::polygon(other.digit()?)?),
        };
        Some(cmd)
    }
}

/// The sandbox application: routes window input into the sketch and draws it.
pub struct Studio {
    sketch: Sketch,
    draw_list: DrawList,
    renderer: PrimitiveRenderer,

    clear: Color,
    title: String,
    title_stale: bool,
}

impl Studio {
    pub fn new(config: StudioConfig) -> Self {
        Self {
            sketch: Sketch::new(config.sketch),
            draw_list: DrawList::new(),
            renderer: PrimitiveRenderer::new(),
            clear: config.clear,
            title: config.title,
            title_stale: false,
        }
    }

    fn window_title(&self) -> String {
        match self.sketch.tool() {
            Some(tool) => format!("{} | {}", self.title, tool.label()),
            None => self.title.clone(),
        }
    }

    /// Applies a studio command.
    pub fn apply(&mut self, cmd: Command) -> AppControl {
        match cmd {
            Command::Arm(tool) => {
                self.sketch.set_tool(Some(tool));
                self.title_stale = true;
            }
            Command::Clear => self.sketch.clear(),
            Command::ToggleNewest => {
                if let Some(id) = self.sketch.scene().last_id() {
                    if let Some(visible) = self.sketch.toggle_visibility(id) {
                        log::info!("{id} visible={visible}");
                    }
                }
            }
            Command::RemoveNewest => {
                if let Some(id) = self.sketch.scene().last_id() {
                    self.sketch.remove(id);
                }
            }
            Command::Exit => return AppControl::Exit,
        }
        AppControl::Continue
    }

    /// Routes one input event; positions arrive in logical window pixels.
    ///
    /// A zero-sized `viewport` (minimized window) is ignored and positions are
    /// mapped with the last valid one.
    pub fn handle(&mut self, event: &InputEvent, viewport: Viewport) -> AppControl {
        self.sketch.set_viewport(viewport);
        let viewport = self.sketch.viewport();

        match *event {
            InputEvent::PointerMoved(ev) => {
                self.sketch.pointer_moved(viewport.to_ndc(Vec2::new(ev.x, ev.y)));
            }
            InputEvent::PointerButton(ev) if ev.button == MouseButton::Left => {
                let p = viewport.to_ndc(Vec2::new(ev.x, ev.y));
                if let Some(outcome) = self.sketch.pointer_button(p, ev.pressed) {
                    log::trace!("click: {outcome:?}");
                }
            }
            InputEvent::Key { key, action, .. } => {
                if action == KeyAction::Press {
                    if let Some(cmd) = Command::for_key(key) {
                        if self.apply(cmd) == AppControl::Exit {
                            return AppControl::Exit;
                        }
                    }
                }
                self.sketch.key(key, action);
            }
            _ => {}
        }
        AppControl::Continue
    }

    #[inline]
    pub fn sketch(&self) -> &Sketch {
        &self.sketch
    }
}

impl App for Studio {
    fn on_input(&mut self, event: &InputEvent, window: &WindowCtx<'_>) -> AppControl {
        self.handle(event, window.viewport())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.sketch.set_viewport(ctx.window.viewport());

        if self.title_stale {
            ctx.runtime.set_title(self.window_title());
            self.title_stale = false;
        }

        self.draw_list.clear();
        self.sketch.draw(&mut self.draw_list);

        let dl = &self.draw_list;
        let renderer = &mut self.renderer;
        ctx.render(self.clear, |rctx, target| {
            renderer.render(rctx, target, dl);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ductus_engine::input::{PointerButtonEvent, PointerMoveEvent};
    use ductus_engine::scene::DrawCmd;

    const VP: Viewport = Viewport::new(400.0, 400.0);

    fn studio() -> Studio {
        Studio::new(StudioConfig::default())
    }

    fn key(s: &mut Studio, key: Key) -> AppControl {
        let press = s.handle(&InputEvent::Key { key, action: KeyAction::Press, code: 0 }, VP);
        s.handle(&InputEvent::Key { key, action: KeyAction::Release, code: 0 }, VP);
        press
    }

    fn click_px(s: &mut Studio, x: f32, y: f32) {
        s.handle(&InputEvent::PointerMoved(PointerMoveEvent { x, y }), VP);
        click_px_in(s, x, y, VP);
    }

    fn click_px_in(s: &mut Studio, x: f32, y: f32, viewport: Viewport) {
        for pressed in [true, false] {
            let ev = PointerButtonEvent { button: MouseButton::Left, pressed, x, y };
            s.handle(&InputEvent::PointerButton(ev), viewport);
        }
    }

    // ── key bindings ──────────────────────────────────────────────────────

    #[test]
    fn tool_keys() {
        assert_eq!(Command::for_key(Key::L), Some(Command::Arm(Tool::Line)));
        assert_eq!(Command::for_key(Key::K), Some(Command::Arm(Tool::Bresenham)));
        assert_eq!(Command::for_key(Key::Digit3), Some(Command::Arm(Tool::Triangle)));
        assert_eq!(Command::for_key(Key::Digit6), Some(Command::Arm(Tool::Hexagon)));
        assert_eq!(Command::for_key(Key::Digit7), None);
        assert_eq!(Command::for_key(Key::S), Some(Command::Arm(Tool::Scanline)));
        assert_eq!(Command::for_key(Key::R), None);
    }

    #[test]
    fn escape_exits() {
        assert_eq!(key(&mut studio(), Key::Escape), AppControl::Exit);
    }

    // ── routing ───────────────────────────────────────────────────────────

    #[test]
    fn clicks_in_pixels_build_a_triangle() {
        let mut s = studio();
        key(&mut s, Key::Digit3);
        assert!(s.title_stale);
        assert_eq!(s.window_title(), "ductus | triangle");

        click_px(&mut s, 200.0, 200.0);
        click_px(&mut s, 400.0, 200.0);
        click_px(&mut s, 200.0, 0.0);

        let scene = s.sketch().scene();
        let id = scene.last_id().unwrap();
        assert!(scene.get(id).unwrap().is_locked());
        assert_eq!(s.sketch().hit_test(VP.to_ndc(Vec2::new(250.0, 150.0))), Some(id));
    }

    #[test]
    fn right_button_is_not_a_click() {
        let mut s = studio();
        key(&mut s, Key::L);
        s.handle(
            &InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Right,
                pressed: true,
                x: 10.0,
                y: 10.0,
            }),
            VP,
        );
        assert!(s.sketch().scene().is_empty());
    }

    #[test]
    fn minimized_window_keeps_last_viewport() {
        let mut s = studio();
        key(&mut s, Key::L);
        click_px(&mut s, 200.0, 200.0);

        let minimized = Viewport::new(0.0, 0.0);
        let moved = PointerMoveEvent { x: 300.0, y: 100.0 };
        s.handle(&InputEvent::PointerMoved(moved), minimized);
        click_px_in(&mut s, 300.0, 100.0, minimized);
        assert_eq!(s.sketch().viewport(), VP);

        let mut out = DrawList::new();
        s.sketch().draw(&mut out);
        let [DrawCmd::Lines(line)] = out.items() else {
            panic!("expected one line, got {:?}", out.items());
        };
        assert!(line.vertices.iter().all(|v| v.is_finite()));
        assert_eq!(line.vertices, vec![Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.5)]);
    }

    #[test]
    fn hide_and_remove_newest() {
        let mut s = studio();
        key(&mut s, Key::L);
        click_px(&mut s, 10.0, 10.0);
        click_px(&mut s, 100.0, 10.0);
        let id = s.sketch().scene().last_id().unwrap();

        key(&mut s, Key::H);
        assert!(!s.sketch().scene().is_visible(id));

        key(&mut s, Key::Backspace);
        assert!(s.sketch().scene().is_empty());
    }

    #[test]
    fn clear_key_empties_scene() {
        let mut s = studio();
        key(&mut s, Key::Digit4);
        click_px(&mut s, 10.0, 10.0);
        key(&mut s, Key::C);
        assert!(s.sketch().scene().is_empty());
        assert!(!s.sketch().gesture().is_tracking());
    }
}
