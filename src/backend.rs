/*
 * Seams between the portable layer and a concrete windowing system. A
 * `PlatformBackend` answers capability queries and mints `PlatformWindow`
 * bindings; the rest of the crate only talks to these traits, so new backends
 * plug in without touching the adoption or creation logic.
 */

use crate::error::Result as PlatformResult;
use crate::types::{NativeWindowId, PlatformCapability, Rect, WindowConfig};

/// A windowing-system backend.
pub trait PlatformBackend {
    /// Short identifier used in diagnostics ("win32", "headless", ...).
    fn name(&self) -> &'static str;

    /// Reports whether an optional capability is available. Side-effect free;
    /// callers consult this before attempting the gated operation.
    fn supports(&self, capability: PlatformCapability) -> bool;

    /// Creates a toolkit-owned native window. The returned binding owns the
    /// native resource and destroys it when dropped.
    fn create_window(&self, config: &WindowConfig) -> PlatformResult<Box<dyn PlatformWindow>>;

    /// Binds an externally-owned native window without taking ownership.
    ///
    /// Implementations must validate the handle and may read its state, but
    /// must not reposition, resize, reparent, show, or otherwise mutate the
    /// native window. At binding time the caller's intent is unknown (the
    /// foreign window may be a passive embedding parent or a window the
    /// toolkit will later manage), so no mutation rights are assumed. The
    /// returned binding reports `owns_native_window() == false` and its drop
    /// leaves the native resource untouched.
    fn adopt_foreign_window(
        &self,
        native_id: NativeWindowId,
    ) -> PlatformResult<Box<dyn PlatformWindow>>;
}

/// The platform-specific handle object behind a toolkit window.
///
/// A binding either owns its native window (toolkit-created) or merely
/// observes one that belongs to an external owner (adopted). Accessors pass
/// through to the native side; they never cache.
pub trait PlatformWindow {
    /// The native identifier this binding is attached to.
    fn native_id(&self) -> NativeWindowId;

    /// Whether the native resource still exists, as far as the backend can
    /// tell. For adopted windows the external owner may invalidate the
    /// handle at any time; this is a best-effort probe, not a guarantee.
    fn is_valid(&self) -> bool;

    /// Current geometry as reported by the native side.
    fn geometry(&self) -> PlatformResult<Rect>;

    /// Moves and resizes the native window. For adopted windows this is only
    /// reached through an explicit caller request on the wrapper.
    fn set_geometry(&self, rect: Rect) -> PlatformResult<()>;

    /// True when dropping this binding destroys the native window.
    fn owns_native_window(&self) -> bool;
}
