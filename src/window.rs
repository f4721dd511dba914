/*
 * The toolkit-side window object. A `Window` pairs a logical `WindowId` with
 * a boxed `PlatformWindow` binding and caches the geometry observed when the
 * binding was established. Adopted windows carry `WindowFlags::FOREIGN`.
 * Dropping a `Window` releases only the toolkit-side binding; whether the
 * native window dies with it is decided by the binding's ownership regime,
 * never by this type.
 */

use crate::backend::PlatformWindow;
use crate::error::{PlatformError, Result as PlatformResult};
use crate::types::{NativeWindowId, Rect, WindowFlags, WindowId};

pub struct Window {
    id: WindowId,
    flags: WindowFlags,
    geometry: Rect,
    platform: Option<Box<dyn PlatformWindow>>,
}

impl Window {
    /// Wraps a platform binding. `geometry` is the state observed on the
    /// native side at binding time and becomes the wrapper's cached geometry.
    pub(crate) fn bound(
        id: WindowId,
        flags: WindowFlags,
        geometry: Rect,
        platform: Box<dyn PlatformWindow>,
    ) -> Self {
        Self {
            id,
            flags,
            geometry,
            platform: Some(platform),
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn flags(&self) -> WindowFlags {
        self.flags
    }

    /// Whether this window wraps a native handle the toolkit did not create.
    pub fn is_foreign(&self) -> bool {
        self.flags.contains(WindowFlags::FOREIGN)
    }

    pub fn has_platform_binding(&self) -> bool {
        self.platform.is_some()
    }

    /// The native identifier behind this window, if a binding exists.
    pub fn native_id(&self) -> Option<NativeWindowId> {
        self.platform.as_ref().map(|p| p.native_id())
    }

    /// Cached geometry. Equal to the native geometry at binding time; stays
    /// stable across reads until `set_geometry` or `refresh_geometry` runs,
    /// even if the external owner moves the native window in the meantime.
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Re-reads geometry from the native side and updates the cache.
    pub fn refresh_geometry(&mut self) -> PlatformResult<Rect> {
        let platform = self.platform_binding()?;
        let current = platform.geometry()?;
        self.geometry = current;
        Ok(current)
    }

    /*
     * Moves and resizes the native window through the binding.
     * [WD-ForeignMutationV1] For foreign windows, an explicit call here is the
     * caller's grant of mutation rights; nothing in this crate issues it on
     * the caller's behalf.
     */
    pub fn set_geometry(&mut self, rect: Rect) -> PlatformResult<()> {
        let native_id = {
            let platform = self.platform_binding()?;
            platform.set_geometry(rect)?;
            platform.native_id()
        };
        self.geometry = rect;
        log::debug!(
            "Platform: Window {:?} geometry set to {rect:?} via binding {native_id:?}.",
            self.id
        );
        Ok(())
    }

    /// Releases the platform binding without consuming the wrapper. For
    /// adopted windows the native resource is left to its external owner;
    /// for toolkit-created windows the binding's drop destroys it. The
    /// wrapper keeps its id, flags, and last cached geometry.
    pub fn release_platform_binding(&mut self) {
        if let Some(platform) = self.platform.take() {
            log::debug!(
                "Platform: Window {:?} releasing binding to {:?} (owned: {}).",
                self.id,
                platform.native_id(),
                platform.owns_native_window()
            );
        }
    }

    fn platform_binding(&self) -> PlatformResult<&dyn PlatformWindow> {
        self.platform.as_deref().ok_or_else(|| {
            PlatformError::InvalidHandle(format!(
                "Window {:?} has no platform binding",
                self.id
            ))
        })
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("flags", &self.flags)
            .field("geometry", &self.geometry)
            .field("native_id", &self.native_id())
            .finish()
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        log::debug!(
            "Platform: Window {:?} dropped; releasing toolkit-side binding (foreign: {}).",
            self.id,
            self.is_foreign()
        );
    }
}
