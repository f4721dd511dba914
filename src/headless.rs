/*
 * Windowing backend with no display server: native windows are entries in an
 * in-process registry. It plays two roles. As a `PlatformBackend` it is the
 * default on platforms without a Win32 backend, and the backend the test
 * suite runs against everywhere. Through its provider surface
 * (`create_native_window` and friends) it stands in for the *external owner*
 * of a native window, which makes foreign-window adoption exercisable
 * without a window system.
 */

use std::collections::HashMap;
use std::sync::atomic::{AtomicIsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::backend::{PlatformBackend, PlatformWindow};
use crate::error::{PlatformError, Result as PlatformResult};
use crate::types::{NativeWindowId, PlatformCapability, Rect, WindowConfig};

#[derive(Debug, Clone)]
struct NativeWindowRecord {
    geometry: Rect,
    title: String,
}

#[derive(Debug)]
struct HeadlessState {
    registry: Mutex<HashMap<isize, NativeWindowRecord>>,
    next_native_id: AtomicIsize,
}

impl HeadlessState {
    fn registry(&self) -> PlatformResult<MutexGuard<'_, HashMap<isize, NativeWindowRecord>>> {
        self.registry.lock().map_err(|_| {
            PlatformError::OperationFailed("headless window registry lock poisoned".into())
        })
    }
}

/// Simulated native window system.
///
/// The backend owns the registry; bindings hold only a `Weak` observer of it,
/// so a binding never keeps a simulated window (or the registry) alive.
#[derive(Debug)]
pub struct HeadlessBackend {
    state: Arc<HeadlessState>,
    foreign_windows: bool,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self {
            state: Arc::new(HeadlessState {
                registry: Mutex::new(HashMap::new()),
                next_native_id: AtomicIsize::new(1),
            }),
            foreign_windows: true,
        }
    }

    /// Backend whose capability gate refuses foreign-window adoption. Lets
    /// callers exercise the unsupported path on any platform.
    pub fn without_foreign_windows() -> Self {
        Self {
            foreign_windows: false,
            ..Self::new()
        }
    }

    /*
     * Provider surface. These model the external owner of a native window:
     * whoever creates a window here is responsible for destroying it, exactly
     * like a real native handle owner. Adoption never calls any of the
     * mutating operations below.
     */

    /// Creates a simulated native window and returns its handle. The caller
    /// is its owner; nothing in this crate will destroy it.
    pub fn create_native_window(&self, geometry: Rect) -> PlatformResult<NativeWindowId> {
        let raw = self.state.next_native_id.fetch_add(1, Ordering::Relaxed);
        self.state.registry()?.insert(
            raw,
            NativeWindowRecord {
                geometry,
                title: String::new(),
            },
        );
        log::debug!("Headless: created native window {raw:#x} at {geometry:?}.");
        Ok(NativeWindowId::new(raw))
    }

    pub fn destroy_native_window(&self, native_id: NativeWindowId) -> PlatformResult<()> {
        if self.state.registry()?.remove(&native_id.raw()).is_none() {
            return Err(PlatformError::InvalidHandle(format!(
                "no native window behind {native_id:?}"
            )));
        }
        log::debug!("Headless: destroyed native window {:#x}.", native_id.raw());
        Ok(())
    }

    pub fn native_geometry(&self, native_id: NativeWindowId) -> PlatformResult<Rect> {
        self.state
            .registry()?
            .get(&native_id.raw())
            .map(|record| record.geometry)
            .ok_or_else(|| {
                PlatformError::InvalidHandle(format!("no native window behind {native_id:?}"))
            })
    }

    pub fn set_native_geometry(
        &self,
        native_id: NativeWindowId,
        geometry: Rect,
    ) -> PlatformResult<()> {
        let mut registry = self.state.registry()?;
        let record = registry.get_mut(&native_id.raw()).ok_or_else(|| {
            PlatformError::InvalidHandle(format!("no native window behind {native_id:?}"))
        })?;
        record.geometry = geometry;
        Ok(())
    }

    pub fn native_title(&self, native_id: NativeWindowId) -> PlatformResult<String> {
        self.state
            .registry()?
            .get(&native_id.raw())
            .map(|record| record.title.clone())
            .ok_or_else(|| {
                PlatformError::InvalidHandle(format!("no native window behind {native_id:?}"))
            })
    }

    pub fn is_native_window(&self, native_id: NativeWindowId) -> bool {
        self.state
            .registry()
            .map(|registry| registry.contains_key(&native_id.raw()))
            .unwrap_or(false)
    }

    pub fn native_window_count(&self) -> usize {
        self.state
            .registry()
            .map(|registry| registry.len())
            .unwrap_or(0)
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBackend for HeadlessBackend {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn supports(&self, capability: PlatformCapability) -> bool {
        match capability {
            PlatformCapability::ForeignWindows => self.foreign_windows,
            PlatformCapability::NativeWindowCreation => true,
        }
    }

    fn create_window(&self, config: &WindowConfig) -> PlatformResult<Box<dyn PlatformWindow>> {
        let raw = self.state.next_native_id.fetch_add(1, Ordering::Relaxed);
        self.state.registry()?.insert(
            raw,
            NativeWindowRecord {
                geometry: Rect::new(0, 0, config.width, config.height),
                title: config.title.clone(),
            },
        );
        log::debug!(
            "Headless: created toolkit-owned window {raw:#x} ('{}', {}x{}).",
            config.title,
            config.width,
            config.height
        );
        Ok(Box::new(HeadlessWindow {
            state: Arc::downgrade(&self.state),
            native_id: NativeWindowId::new(raw),
            owns: true,
        }))
    }

    fn adopt_foreign_window(
        &self,
        native_id: NativeWindowId,
    ) -> PlatformResult<Box<dyn PlatformWindow>> {
        if !self.foreign_windows {
            return Err(PlatformError::UnsupportedCapability(
                PlatformCapability::ForeignWindows,
            ));
        }
        if !self.state.registry()?.contains_key(&native_id.raw()) {
            return Err(PlatformError::InvalidHandle(format!(
                "no native window behind {native_id:?}"
            )));
        }
        // Binding only. The record is left byte-for-byte as its owner set it.
        log::debug!(
            "Headless: bound foreign window {:#x} without taking ownership.",
            native_id.raw()
        );
        Ok(Box::new(HeadlessWindow {
            state: Arc::downgrade(&self.state),
            native_id,
            owns: false,
        }))
    }
}

/*
 * Binding to one simulated native window. Holds a `Weak` observer of the
 * registry: if the backend goes away first, the binding degrades to invalid
 * instead of faulting or pinning the registry alive.
 */
struct HeadlessWindow {
    state: Weak<HeadlessState>,
    native_id: NativeWindowId,
    owns: bool,
}

impl HeadlessWindow {
    fn state(&self) -> PlatformResult<Arc<HeadlessState>> {
        self.state.upgrade().ok_or_else(|| {
            PlatformError::InvalidHandle(format!(
                "native window system behind {:?} is gone",
                self.native_id
            ))
        })
    }
}

impl PlatformWindow for HeadlessWindow {
    fn native_id(&self) -> NativeWindowId {
        self.native_id
    }

    fn is_valid(&self) -> bool {
        match self.state.upgrade() {
            Some(state) => state
                .registry()
                .map(|registry| registry.contains_key(&self.native_id.raw()))
                .unwrap_or(false),
            None => false,
        }
    }

    fn geometry(&self) -> PlatformResult<Rect> {
        let state = self.state()?;
        let registry = state.registry()?;
        registry
            .get(&self.native_id.raw())
            .map(|record| record.geometry)
            .ok_or_else(|| {
                PlatformError::InvalidHandle(format!(
                    "no native window behind {:?}",
                    self.native_id
                ))
            })
    }

    fn set_geometry(&self, rect: Rect) -> PlatformResult<()> {
        let state = self.state()?;
        let mut registry = state.registry()?;
        let record = registry.get_mut(&self.native_id.raw()).ok_or_else(|| {
            PlatformError::InvalidHandle(format!(
                "no native window behind {:?}",
                self.native_id
            ))
        })?;
        record.geometry = rect;
        Ok(())
    }

    fn owns_native_window(&self) -> bool {
        self.owns
    }
}

impl Drop for HeadlessWindow {
    fn drop(&mut self) {
        if !self.owns {
            // Adopted handle: when it dies is its owner's call, not ours.
            return;
        }
        if let Some(state) = self.state.upgrade()
            && let Ok(mut registry) = state.registry()
        {
            registry.remove(&self.native_id.raw());
            log::debug!(
                "Headless: toolkit-owned window {:#x} destroyed with its binding.",
                self.native_id.raw()
            );
        }
    }
}
