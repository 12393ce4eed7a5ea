//! Multi-listener registry with a per-invocation remain/detach contract.
//!
//! A [`Dispatcher`] stores listeners of one type in registration order. During
//! [`Dispatcher::dispatch`] every listener answers with a [`Flow`]; those that
//! answer [`Flow::Detach`] are dropped right after their own invocation without
//! disturbing the iteration over the rest.
//!
//! Listeners cannot be added while a dispatch is running: both operations take
//! `&mut self`.

use std::fmt;

/// Answer of a listener to one invocation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Flow {
    /// Stay registered.
    Remain,
    /// Unregister after this invocation.
    Detach,
}

/// Stable handle returned by [`Dispatcher::add_listener`].
///
/// Ids are unique per dispatcher and never reused.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// Ordered listener registry.
pub struct Dispatcher<L> {
    listeners: Vec<(ListenerId, L)>,
    next_id: u64,
}

impl<L> Default for Dispatcher<L> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }
}

impl<L: fmt::Debug> fmt::Debug for Dispatcher<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl<L> Dispatcher<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a listener. It is first invoked by the next dispatch.
    pub fn add_listener(&mut self, listener: L) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Invokes `f` on every listener in registration order and removes the
    /// ones that answered [`Flow::Detach`].
    ///
    /// Returns how many listeners detached.
    pub fn dispatch<F>(&mut self, mut f: F) -> usize
    where
        F: FnMut(&mut L) -> Flow,
    {
        let before = self.listeners.len();
        self.listeners
            .retain_mut(|(_, listener)| f(listener) == Flow::Remain);
        before - self.listeners.len()
    }

    /// Invokes `f` on every listener in registration order. Nothing detaches.
    pub fn notify<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut L),
    {
        for (_, listener) in &mut self.listeners {
            f(listener);
        }
    }

    /// Removes one listener by id.
    pub fn detach(&mut self, id: ListenerId) -> Option<L> {
        let idx = self.listeners.iter().position(|(lid, _)| *lid == id)?;
        Some(self.listeners.remove(idx).1)
    }

    /// Removes every listener matching `pred`; returns how many were removed.
    pub fn detach_where<P>(&mut self, mut pred: P) -> usize
    where
        P: FnMut(&L) -> bool,
    {
        let before = self.listeners.len();
        self.listeners.retain(|(_, l)| !pred(l));
        before - self.listeners.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Registered ids in invocation order.
    pub fn ids(&self) -> impl Iterator<Item = ListenerId> + '_ {
        self.listeners.iter().map(|(id, _)| *id)
    }

    /// Registered listeners in invocation order.
    pub fn listeners(&self) -> impl Iterator<Item = &L> + '_ {
        self.listeners.iter().map(|(_, l)| l)
    }
}
