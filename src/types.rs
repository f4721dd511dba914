/*
 * Platform-agnostic types shared between the public surface and the backends.
 * Everything here compiles on every platform; nothing references Win32
 * directly. Native window identifiers travel as opaque pointer-sized values
 * so a handle can cross the toolkit boundary without dragging platform types
 * along with it.
 */

use bitflags::bitflags;

/// Logical identifier for a toolkit-side window object.
///
/// Allocated by `PlatformInterface` and never derived from the native handle,
/// so toolkit bookkeeping stays meaningful even after the native side is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub i32);

impl WindowId {
    pub fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> i32 {
        self.0
    }
}

/// Opaque identifier for a platform-owned native window resource.
///
/// On Windows this carries the HWND bits; the headless backend hands out
/// registry keys. The value is only meaningful to the backend that issued it.
/// Holding a `NativeWindowId` confers no ownership: creating and destroying
/// the underlying resource stays with its external owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeWindowId(isize);

impl NativeWindowId {
    /// The null handle. Never refers to a live native window.
    pub const NULL: Self = Self(0);

    pub const fn new(raw: isize) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> isize {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl From<isize> for NativeWindowId {
    fn from(raw: isize) -> Self {
        Self(raw)
    }
}

/// Window geometry: position of the top-left corner plus size, in screen
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

bitflags! {
    /// State and behavior markers carried by a toolkit window object.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WindowFlags: u32 {
        /// The window wraps a native handle the toolkit did not create and
        /// does not own.
        const FOREIGN = 1 << 0;
        const VISIBLE = 1 << 1;
        const RESIZABLE = 1 << 2;
    }
}

/// Creation parameters for a toolkit-owned window.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub flags: WindowFlags,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            width: 800,
            height: 600,
            flags: WindowFlags::VISIBLE | WindowFlags::RESIZABLE,
        }
    }
}

/// Optional features a platform backend may or may not provide.
///
/// Queried through `PlatformBackend::supports` before the corresponding
/// operation is attempted; the query itself has no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformCapability {
    /// Adopting window handles created outside the toolkit.
    ForeignWindows,
    /// Creating toolkit-owned native windows.
    NativeWindowCreation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_native_id_is_never_a_window() {
        assert!(NativeWindowId::NULL.is_null());
        assert!(!NativeWindowId::new(0x1234).is_null());
        assert_eq!(NativeWindowId::from(42isize).raw(), 42);
    }

    #[test]
    fn rect_emptiness_tracks_extent_not_position() {
        assert!(Rect::new(10, 20, 0, 5).is_empty());
        assert!(!Rect::new(-50, -50, 100, 100).is_empty());
        assert!(Rect::default().is_empty());
    }

    #[test]
    fn default_window_config_is_not_foreign() {
        let config = WindowConfig::default();
        assert!(!config.flags.contains(WindowFlags::FOREIGN));
        assert!(config.flags.contains(WindowFlags::VISIBLE));
    }
}
