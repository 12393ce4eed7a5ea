//! Interactive shape construction and rasterization.
//!
//! Raw input enters through [`Sketch`]: pointer positions in NDC, primary
//! button transitions and key events. The sketch owns the shared drag gesture,
//! the listener registries and the shape arena; shapes react to the events
//! routed to them and record their geometry into an engine
//! [`DrawList`](ductus_engine::scene::DrawList).
//!
//! Dependency direction: `observer` <- `events` <- `shapes` <- `scene` <- `sketch`.
//! `geom` and `raster` are pure and shared by all layers.

pub mod events;
pub mod geom;
pub mod observer;
pub mod raster;
pub mod scene;
pub mod shapes;

mod sketch;

pub use scene::{Scene, ShapeId};
pub use sketch::{GestureTarget, KeyBinding, Sketch, SketchConfig, Tool};
