use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;
use crate::input::InputState;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "ductus".to_string(),
            initial_size: LogicalSize::new(800.0, 800.0),
        }
    }
}

/// Requests an app can make from `on_frame`.
///
/// Applied once the frame callback has returned.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    title: Option<String>,
    exit: bool,
}

impl RuntimeCtx {
    /// Replaces the window title. The last call in a frame wins.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn exit(&mut self) {
        self.exit = true;
    }
}

/// Single-window event loop driver.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `app` until it exits or the window closes.
    ///
    /// A failure during window or GPU setup ends the loop and is returned.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create event loop")?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut host = Host {
            config,
            gpu_init,
            app,
            entry: None,
            exiting: false,
            failure: None,
        };
        event_loop
            .run_app(&mut host)
            .context("event loop terminated with an error")?;

        host.failure.map_or(Ok(()), Err)
    }
}

// The surface inside `gpu` borrows `window`.
#[self_referencing]
struct WindowEntry {
    input: InputState,
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl WindowEntry {
    fn open(
        event_loop: &ActiveEventLoop,
        config: &RuntimeConfig,
        gpu_init: GpuInit,
    ) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.as_str())
            .with_inner_size(config.initial_size);
        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        WindowEntryTryBuilder {
            input: InputState::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")
    }

    fn request_redraw(&self) {
        self.with_window(|w| w.request_redraw());
    }

    /// Resizes the surface to the window's current drawable size.
    fn sync_surface_size(&mut self) {
        let size = self.with_window(|w| w.inner_size());
        self.with_gpu_mut(|gpu| gpu.resize(size));
        log::trace!("surface resized to {}x{}", size.width, size.height);
    }
}

struct Host<A> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    exiting: bool,
    failure: Option<anyhow::Error>,
}

impl<A: App + 'static> Host<A> {
    fn shut_down(&mut self, event_loop: &ActiveEventLoop) {
        self.exiting = true;
        event_loop.exit();
    }

    /// Translates `event`, records it in the input state and hands it to the app.
    fn route_input(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let app = &mut self.app;
        let Some(entry) = self.entry.as_mut() else {
            return AppControl::Continue;
        };

        entry.with_mut(|fields| {
            let Some(ev) = translate_window_event(fields.window, fields.input, event) else {
                return AppControl::Continue;
            };
            fields.input.apply_event(&ev);
            app.on_input(&ev, &WindowCtx { id: window_id, window: fields.window })
        })
    }

    fn redraw(&mut self, window_id: WindowId) -> RuntimeCtx {
        let mut runtime = RuntimeCtx::default();
        let app = &mut self.app;
        let Some(entry) = self.entry.as_mut() else {
            return runtime;
        };

        let control = entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx { id: window_id, window: fields.window },
                gpu: fields.gpu,
                input: fields.input,
                runtime: &mut runtime,
            };
            app.on_frame(&mut ctx)
        });
        if control == AppControl::Exit {
            runtime.exit();
        }
        runtime
    }

    fn apply(&mut self, event_loop: &ActiveEventLoop, runtime: RuntimeCtx) {
        if let (Some(title), Some(entry)) = (runtime.title, self.entry.as_ref()) {
            entry.with_window(|w| w.set_title(&title));
        }
        if runtime.exit {
            log::info!("exit requested by app");
            self.shut_down(event_loop);
        }
    }
}

impl<A: App + 'static> ApplicationHandler for Host<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        match WindowEntry::open(event_loop, &self.config, self.gpu_init.clone()) {
            Ok(entry) => {
                entry.request_redraw();
                self.entry = Some(entry);
            }
            Err(err) => {
                log::error!("startup failed: {err:#}");
                self.failure = Some(err);
                self.shut_down(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exiting {
            event_loop.exit();
            return;
        }
        // Redraw continuously; shapes under construction follow the pointer.
        if let Some(entry) = self.entry.as_ref() {
            entry.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exiting {
            return;
        }

        if self.route_input(window_id, &event) == AppControl::Exit {
            self.shut_down(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                self.entry = None;
                self.shut_down(event_loop);
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.sync_surface_size();
                    entry.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                let runtime = self.redraw(window_id);
                self.apply(event_loop, runtime);
            }
            _ => {}
        }
    }
}
