/*
 * Provides the public entry point for the WindowDuct crate, a small platform
 * layer for adopting externally-owned native windows ("foreign windows") into
 * toolkit window objects, alongside a minimal toolkit-owned creation path.
 * Adoption is capability-gated and strictly read-only: wrapping a native
 * handle never repositions, resizes, or reparents the window it wraps, and
 * dropping the wrapper never destroys it.
 *
 * The library exposes only the safe API surface (`PlatformInterface`,
 * `Window`, the portable types and errors) while keeping backend internals
 * scoped to the crate. Conditional compilation keeps portable pieces
 * available on every platform, so non-Windows builds compile and test against
 * the headless backend.
 */
pub mod backend;
pub mod error;
pub mod headless;
pub mod platform;
pub mod types;
#[cfg(target_os = "windows")]
pub(crate) mod win32;
pub mod window;

pub use backend::{PlatformBackend, PlatformWindow};
pub use error::{PlatformError, Result as PlatformResult};
pub use headless::HeadlessBackend;
pub use platform::PlatformInterface;
pub use types::{NativeWindowId, PlatformCapability, Rect, WindowConfig, WindowFlags, WindowId};
pub use window::Window;
#[cfg(target_os = "windows")]
pub use win32::Win32Backend;
