//! Scoped variable environment for the Imp evaluator.

use imp_types::Int;
use std::collections::BTreeMap;

/// A single scope frame.
#[derive(Debug, Clone, Default)]
struct Frame {
    bindings: BTreeMap<String, Int>,
}

/// Scoped variable environment with push/pop semantics.
///
/// One frame per active call, plus the global frame at the bottom.
/// Because calls chain to the caller's active scope rather than a
/// definition site, the frame stack is the scope chain: names resolve
/// from the innermost frame outward.
#[derive(Debug, Clone)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Environment {
    /// Create a new environment with one global frame.
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
        }
    }

    /// Push a new frame (function call entry).
    pub fn push_frame(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Pop the innermost frame. The global frame is never popped.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Bind a name in the current (innermost) frame unconditionally.
    pub fn define(&mut self, name: &str, value: Int) {
        if let Some(frame) = self.frames.last_mut() {
            frame.bindings.insert(name.to_string(), value);
        }
    }

    /// Look up a name, searching from innermost to outermost frame.
    ///
    /// The walk tests key presence, never the bound value: a name bound
    /// to zero is found in its own frame, and only a name absent from
    /// every frame yields `None`.
    pub fn get(&self, name: &str) -> Option<Int> {
        for frame in self.frames.iter().rev() {
            if let Some(v) = frame.bindings.get(name) {
                return Some(*v);
            }
        }
        None
    }

    /// Update the nearest enclosing frame where the name is already
    /// bound; if unbound everywhere, create the binding in the
    /// innermost frame.
    pub fn assign(&mut self, name: &str, value: Int) {
        for frame in self.frames.iter_mut().rev() {
            if frame.bindings.contains_key(name) {
                frame.bindings.insert(name.to_string(), value);
                return;
            }
        }
        self.define(name, value);
    }

    /// Read a binding from the global (outermost) frame only.
    pub fn global(&self, name: &str) -> Option<Int> {
        self.frames[0].bindings.get(name).copied()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
