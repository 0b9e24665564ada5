//! The window registry: the authoritative store of known windows.

use std::collections::HashMap;

use super::errors::RegistryError;
use super::types::{WindowAttributes, WindowHandle, WindowType};

/// Owns the set of known windows and their attributes.
///
/// Handles are allocated serially; `all()` iterates in creation order.
/// The registry performs no policy: stacking, visibility, and compositing
/// read it but never write through it.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: HashMap<WindowHandle, WindowAttributes>,
    creation_order: Vec<WindowHandle>,
    next_handle: u64,
}

impl WindowRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new window and returns its handle.
    ///
    /// # Errors
    ///
    /// `RegistryError::DuplicateDesktop` when a desktop window already
    /// exists and `attrs` requests another one.
    pub fn create(&mut self, attrs: WindowAttributes) -> Result<WindowHandle, RegistryError> {
        if attrs.window_type == WindowType::Desktop {
            if let Some(existing) = self.desktop() {
                return Err(RegistryError::DuplicateDesktop(existing));
            }
        }
        self.next_handle += 1;
        let handle = WindowHandle(self.next_handle);
        self.windows.insert(handle, attrs);
        self.creation_order.push(handle);
        Ok(handle)
    }

    /// Returns the attributes of a window.
    pub fn get(&self, handle: WindowHandle) -> Result<&WindowAttributes, RegistryError> {
        self.windows
            .get(&handle)
            .ok_or(RegistryError::NotFound(handle))
    }

    /// Returns mutable attributes of a window.
    pub fn get_mut(
        &mut self,
        handle: WindowHandle,
    ) -> Result<&mut WindowAttributes, RegistryError> {
        self.windows
            .get_mut(&handle)
            .ok_or(RegistryError::NotFound(handle))
    }

    /// Removes a window, returning its last attributes.
    pub fn destroy(&mut self, handle: WindowHandle) -> Result<WindowAttributes, RegistryError> {
        let attrs = self
            .windows
            .remove(&handle)
            .ok_or(RegistryError::NotFound(handle))?;
        self.creation_order.retain(|h| *h != handle);
        Ok(attrs)
    }

    /// Whether the handle refers to a known window.
    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.windows.contains_key(&handle)
    }

    /// All known handles in creation order.
    pub fn all(&self) -> impl Iterator<Item = WindowHandle> + '_ {
        self.creation_order.iter().copied()
    }

    /// Number of known windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// The desktop window, if one exists.
    pub fn desktop(&self) -> Option<WindowHandle> {
        self.creation_order
            .iter()
            .copied()
            .find(|h| {
                self.windows
                    .get(h)
                    .map(|a| a.window_type == WindowType::Desktop)
                    .unwrap_or(false)
            })
    }
}
