//! Ordered shape arena with per-shape visibility.

use std::fmt;

use ductus_engine::scene::DrawList;

use crate::shapes::{DrawCtx, Shape};

/// Handle to a shape in a [`Scene`].
///
/// Allocated in increasing order and never reused, so a stale handle simply
/// stops resolving once its shape is removed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ShapeId(u32);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape#{}", self.0)
    }
}

struct Entry {
    id: ShapeId,
    shape: Box<dyn Shape>,
    visible: bool,
}

/// Shapes in creation order. Drawing follows that order.
#[derive(Default)]
pub struct Scene {
    entries: Vec<Entry>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a visible shape and returns its handle.
    pub fn push(&mut self, shape: Box<dyn Shape>) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            shape,
            visible: true,
        });
        id
    }

    // Entries stay sorted by id since ids only grow.
    fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.entries.binary_search_by_key(&id, |e| e.id).ok()
    }

    pub fn get(&self, id: ShapeId) -> Option<&dyn Shape> {
        let idx = self.index_of(id)?;
        Some(self.entries[idx].shape.as_ref())
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut (dyn Shape + 'static)> {
        let idx = self.index_of(id)?;
        Some(self.entries[idx].shape.as_mut())
    }

    pub fn remove(&mut self, id: ShapeId) -> Option<Box<dyn Shape>> {
        let idx = self.index_of(id)?;
        Some(self.entries.remove(idx).shape)
    }

    /// Flips visibility; returns the new state.
    pub fn toggle_visibility(&mut self, id: ShapeId) -> Option<bool> {
        let idx = self.index_of(id)?;
        let entry = &mut self.entries[idx];
        entry.visible = !entry.visible;
        Some(entry.visible)
    }

    pub fn is_visible(&self, id: ShapeId) -> bool {
        self.index_of(id).is_some_and(|idx| self.entries[idx].visible)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Handles in creation order.
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = ShapeId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// Most recently created shape still in the scene.
    pub fn last_id(&self) -> Option<ShapeId> {
        self.entries.last().map(|e| e.id)
    }

    /// Visible shapes, topmost first.
    pub fn visible_top_down(&self) -> impl Iterator<Item = (ShapeId, &dyn Shape)> + '_ {
        self.entries
            .iter()
            .rev()
            .filter(|e| e.visible)
            .map(|e| (e.id, e.shape.as_ref()))
    }

    /// Records every visible shape in creation order.
    pub fn draw(&self, ctx: &DrawCtx, out: &mut DrawList) {
        for entry in self.entries.iter().filter(|e| e.visible) {
            entry.shape.draw(ctx, out);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Point, Viewport};
    use crate::shapes::{Line, Polygon};
    use ductus_engine::paint::Color;

    fn line() -> Box<dyn Shape> {
        Box::new(Line::new(Point::new(0.0, 0.0), Color::WHITE))
    }

    #[test]
    fn ids_are_monotonic_and_not_reused() {
        let mut scene = Scene::new();
        let a = scene.push(line());
        let b = scene.push(line());
        assert!(a < b);
        assert!(scene.remove(b).is_some());
        let c = scene.push(line());
        assert!(c > b);
        assert!(scene.get(b).is_none());
        assert_eq!(scene.ids().collect::<Vec<_>>(), vec![a, c]);
    }

    #[test]
    fn hidden_shapes_are_not_drawn() {
        let mut scene = Scene::new();
        let a = scene.push(line());
        scene.push(Box::new(Polygon::<3>::new(Point::new(0.0, 0.0), Color::WHITE)));

        let ctx = DrawCtx::new(Viewport::new(10.0, 10.0));
        let mut out = DrawList::new();
        scene.draw(&ctx, &mut out);
        assert_eq!(out.len(), 2);

        assert_eq!(scene.toggle_visibility(a), Some(false));
        assert!(!scene.is_visible(a));
        out.clear();
        scene.draw(&ctx, &mut out);
        assert_eq!(out.len(), 1);

        assert_eq!(scene.toggle_visibility(a), Some(true));
    }

    #[test]
    fn unknown_ids_resolve_to_nothing() {
        let mut scene = Scene::new();
        let a = scene.push(line());
        scene.clear();
        assert!(scene.get_mut(a).is_none());
        assert_eq!(scene.toggle_visibility(a), None);
        assert!(!scene.is_visible(a));
        assert!(scene.is_empty());
    }

    #[test]
    fn top_down_order_is_reverse_creation() {
        let mut scene = Scene::new();
        let a = scene.push(line());
        let b = scene.push(line());
        let order: Vec<_> = scene.visible_top_down().map(|(id, _)| id).collect();
        assert_eq!(order, vec![b, a]);
    }
}
