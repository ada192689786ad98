//! Contract with the rich-text editing surface.
//!
//! The session never owns the editing engine. It receives a handle when the
//! surface signals readiness and gives it back when the surface is disposed.
//! [`SurfaceBinding`] buffers content pushed while no handle is attached and
//! flushes it exactly once on the next attach.

/// Capability exposed by the rich-text editing component.
pub trait EditableSurface {
    /// Current serialized markup of the surface.
    fn get_content(&self) -> String;

    /// Replaces the whole surface content with `markup`.
    fn set_content(&mut self, markup: &str);
}

/// Non-owning binding between a session and its surface handle.
pub struct SurfaceBinding<S> {
    handle: Option<S>,
    pending: Option<String>,
}

impl<S> Default for SurfaceBinding<S> {
    fn default() -> Self {
        Self {
            handle: None,
            pending: None,
        }
    }
}

impl<S: EditableSurface> SurfaceBinding<S> {
    pub fn is_ready(&self) -> bool {
        self.handle.is_some()
    }

    /// Markup waiting for a handle, if any.
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Stores the handle and applies the buffered body, if one is waiting.
    pub fn attach(&mut self, handle: S) {
        self.handle = Some(handle);
        self.flush();
    }

    /// Releases the handle. Nothing is written to it afterwards.
    pub fn detach(&mut self) -> Option<S> {
        self.handle.take()
    }

    /// Pushes `markup` to the surface now, or buffers it until the next attach.
    pub fn populate(&mut self, markup: &str) {
        match self.handle.as_mut() {
            Some(handle) => {
                self.pending = None;
                handle.set_content(markup);
            }
            None => self.pending = Some(markup.to_owned()),
        }
    }

    /// Buffers `markup` without touching an attached handle.
    pub fn buffer(&mut self, markup: &str) {
        self.pending = Some(markup.to_owned());
    }

    /// Reads the surface content when a handle is attached.
    pub fn read(&self) -> Option<String> {
        self.handle.as_ref().map(EditableSurface::get_content)
    }

    fn flush(&mut self) {
        if let Some(handle) = self.handle.as_mut() {
            if let Some(markup) = self.pending.take() {
                handle.set_content(&markup);
            }
        }
    }
}
