/*
 * Public entry point of the layer. `PlatformInterface` selects a backend,
 * allocates logical window ids, and turns backend bindings into `Window`
 * objects. Foreign-window adoption funnels through here so the capability
 * gate is consulted exactly once, before any backend work happens.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use crate::backend::PlatformBackend;
use crate::error::{PlatformError, Result as PlatformResult};
#[cfg(not(target_os = "windows"))]
use crate::headless::HeadlessBackend;
use crate::types::{NativeWindowId, PlatformCapability, WindowConfig, WindowFlags, WindowId};
#[cfg(target_os = "windows")]
use crate::win32::Win32Backend;
use crate::window::Window;

pub struct PlatformInterface {
    backend: Arc<dyn PlatformBackend>,
    next_window_id: AtomicI32,
}

impl PlatformInterface {
    /// Interface over the platform's default backend: Win32 on Windows, the
    /// headless registry elsewhere. Embedders with a real windowing system on
    /// other platforms supply their own backend via `with_backend`.
    pub fn new() -> Self {
        #[cfg(target_os = "windows")]
        let backend: Arc<dyn PlatformBackend> = Arc::new(Win32Backend::new());
        #[cfg(not(target_os = "windows"))]
        let backend: Arc<dyn PlatformBackend> = Arc::new(HeadlessBackend::new());

        log::debug!(
            "Platform: PlatformInterface starting with '{}' backend.",
            backend.name()
        );
        Self::with_backend(backend)
    }

    pub fn with_backend(backend: Arc<dyn PlatformBackend>) -> Self {
        Self {
            backend,
            next_window_id: AtomicI32::new(1),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn supports(&self, capability: PlatformCapability) -> bool {
        self.backend.supports(capability)
    }

    /// Whether the active backend can adopt windows it did not create. Query
    /// this before calling `adopt_foreign_window`; a `false` here means the
    /// adoption path should be skipped, not worked around.
    pub fn supports_foreign_windows(&self) -> bool {
        self.backend.supports(PlatformCapability::ForeignWindows)
    }

    /// Creates a toolkit-owned window. Its native window is destroyed when
    /// the returned `Window` (or its binding) is dropped.
    pub fn create_window(&self, config: &WindowConfig) -> PlatformResult<Window> {
        if !self.supports(PlatformCapability::NativeWindowCreation) {
            return Err(PlatformError::UnsupportedCapability(
                PlatformCapability::NativeWindowCreation,
            ));
        }

        let binding = self.backend.create_window(config)?;
        let geometry = binding.geometry()?;
        // A caller cannot smuggle the foreign marker in through its config.
        let flags = config.flags - WindowFlags::FOREIGN;
        let id = self.allocate_window_id();
        log::debug!(
            "Platform: created window {id:?} on '{}' with native id {:?}.",
            self.backend.name(),
            binding.native_id()
        );
        Ok(Window::bound(id, flags, geometry, binding))
    }

    /*
     * Adopts an externally-owned native window into a toolkit `Window`.
     *
     * [WD-ForeignAdoptV1] Adoption is read-only with respect to the native
     * resource: the backend validates the handle and the geometry observed
     * immediately before binding is snapshotted into the wrapper, but the
     * native window is never moved, resized, reparented, or shown here. At
     * this point the foreign window may equally be a passive embedding
     * parent or a window the toolkit will later manage, so no mutation
     * rights are assumed on its behalf.
     */
    pub fn adopt_foreign_window(&self, native_id: NativeWindowId) -> PlatformResult<Window> {
        if !self.supports_foreign_windows() {
            log::warn!(
                "Platform: '{}' backend cannot adopt foreign windows; refusing {native_id:?}.",
                self.backend.name()
            );
            return Err(PlatformError::UnsupportedCapability(
                PlatformCapability::ForeignWindows,
            ));
        }
        if native_id.is_null() {
            return Err(PlatformError::InvalidHandle(
                "null native window id".to_string(),
            ));
        }

        let binding = self.backend.adopt_foreign_window(native_id)?;
        let geometry = binding.geometry()?;
        let id = self.allocate_window_id();
        log::debug!(
            "Platform: adopted foreign window {native_id:?} as {id:?}, geometry {geometry:?}."
        );
        Ok(Window::bound(id, WindowFlags::FOREIGN, geometry, binding))
    }

    fn allocate_window_id(&self) -> WindowId {
        WindowId::new(self.next_window_id.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for PlatformInterface {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessBackend;
    use crate::types::Rect;

    fn headless_interface() -> (Arc<HeadlessBackend>, PlatformInterface) {
        let backend = Arc::new(HeadlessBackend::new());
        let interface = PlatformInterface::with_backend(backend.clone());
        (backend, interface)
    }

    #[test]
    // [WD-CapabilityGateV1] A backend without the capability refuses adoption
    // as a recoverable error, and never touches the native window doing so.
    fn adoption_requires_foreign_window_capability() {
        let backend = Arc::new(HeadlessBackend::without_foreign_windows());
        let interface = PlatformInterface::with_backend(backend.clone());
        let native = backend
            .create_native_window(Rect::new(0, 0, 100, 100))
            .unwrap();

        assert!(!interface.supports_foreign_windows());
        let err = interface
            .adopt_foreign_window(native)
            .expect_err("gate reports no support");
        assert!(matches!(
            err,
            PlatformError::UnsupportedCapability(PlatformCapability::ForeignWindows)
        ));

        // The refusal left the native window exactly as its owner made it.
        assert!(backend.is_native_window(native));
        assert_eq!(
            backend.native_geometry(native).unwrap(),
            Rect::new(0, 0, 100, 100)
        );
    }

    #[test]
    // [WD-ForeignAdoptV1] Successful adoption marks the wrapper as foreign
    // and leaves it bound to a live platform handle.
    fn adopting_yields_foreign_marked_bound_window() {
        let (backend, interface) = headless_interface();
        let native = backend
            .create_native_window(Rect::new(0, 0, 200, 100))
            .unwrap();

        let window = interface
            .adopt_foreign_window(native)
            .expect("valid handle adopts");

        assert!(window.is_foreign());
        assert!(window.has_platform_binding());
        assert_eq!(window.native_id(), Some(native));
    }

    #[test]
    // [WD-ForeignAdoptV1] Adoption must not move, resize, or otherwise touch
    // the native window; the wrapper reflects the owner's geometry instead.
    fn adoption_leaves_native_geometry_untouched() {
        // Arrange
        let (backend, interface) = headless_interface();
        let native = backend.create_native_window(Rect::default()).unwrap();
        let initial_geometry = Rect::new(123, 456, 321, 654);
        backend
            .set_native_geometry(native, initial_geometry)
            .unwrap();
        // Act
        let window = interface.adopt_foreign_window(native).unwrap();
        // Assert
        assert_eq!(backend.native_geometry(native).unwrap(), initial_geometry);
        assert_eq!(window.geometry(), initial_geometry);
    }

    #[test]
    // Adoption takes no (exclusive) ownership of the native window, so
    // dropping the wrapper must not destroy or invalidate it.
    fn dropping_wrapper_leaves_native_window_alive() {
        let (backend, interface) = headless_interface();
        let native = backend
            .create_native_window(Rect::new(10, 10, 50, 50))
            .unwrap();

        let window = interface.adopt_foreign_window(native).unwrap();
        drop(window);

        assert!(backend.is_native_window(native));
        // Still fully usable by its original owner.
        backend
            .set_native_geometry(native, Rect::new(1, 1, 20, 20))
            .expect("owner keeps full control");
        backend
            .destroy_native_window(native)
            .expect("owner decides when it dies");
    }

    #[test]
    fn geometry_reads_are_idempotent_without_mutation() {
        let (backend, interface) = headless_interface();
        let native = backend
            .create_native_window(Rect::new(40, 30, 20, 10))
            .unwrap();

        let window = interface.adopt_foreign_window(native).unwrap();
        let first = window.geometry();
        let second = window.geometry();
        let third = window.geometry();
        assert_eq!(first, Rect::new(40, 30, 20, 10));
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn adopting_bad_handles_reports_invalid_handle() {
        let (backend, interface) = headless_interface();

        let err = interface
            .adopt_foreign_window(NativeWindowId::NULL)
            .expect_err("null handle");
        assert!(matches!(err, PlatformError::InvalidHandle(_)));

        let err = interface
            .adopt_foreign_window(NativeWindowId::new(0xDEAD))
            .expect_err("handle the provider never issued");
        assert!(matches!(err, PlatformError::InvalidHandle(_)));

        let stale = backend
            .create_native_window(Rect::new(0, 0, 10, 10))
            .unwrap();
        backend.destroy_native_window(stale).unwrap();
        let err = interface
            .adopt_foreign_window(stale)
            .expect_err("destroyed before adoption");
        assert!(matches!(err, PlatformError::InvalidHandle(_)));
    }

    #[test]
    fn created_windows_are_toolkit_owned_not_foreign() {
        let (backend, interface) = headless_interface();
        let config = WindowConfig {
            title: "duct".to_string(),
            width: 640,
            height: 480,
            // FOREIGN here is a caller mistake; creation strips it.
            flags: WindowFlags::VISIBLE | WindowFlags::FOREIGN,
        };

        let window = interface.create_window(&config).unwrap();
        let native = window.native_id().expect("bound");

        assert!(!window.is_foreign());
        assert!(window.has_platform_binding());
        assert_eq!(window.geometry(), Rect::new(0, 0, 640, 480));

        // Toolkit-owned windows die with their wrapper, unlike adopted ones.
        drop(window);
        assert!(!backend.is_native_window(native));
    }

    #[test]
    fn each_window_gets_its_own_logical_id() {
        let (backend, interface) = headless_interface();
        let a = backend
            .create_native_window(Rect::new(0, 0, 1, 1))
            .unwrap();
        let b = backend
            .create_native_window(Rect::new(0, 0, 2, 2))
            .unwrap();

        let first = interface.adopt_foreign_window(a).unwrap();
        let second = interface.adopt_foreign_window(b).unwrap();
        assert_ne!(first.id(), second.id());
    }
}
