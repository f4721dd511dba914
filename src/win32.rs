/*
 * Win32 backend. Window-class registration and toolkit-owned window creation
 * follow the usual RegisterClassExW/CreateWindowExW dance; foreign adoption
 * binds to any HWND, including ones created by other toolkits or other
 * processes. Bindings store the HWND bits as a plain integer, so a binding
 * pins no window-system resource of its own.
 */

use std::ffi::c_void;

use windows::Win32::Foundation::{GetLastError, HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{COLOR_WINDOW, HBRUSH};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, CreateWindowExW, DefWindowProcW, DestroyWindow,
    GetClassInfoExW, GetWindowRect, IDC_ARROW, IDI_APPLICATION, IsWindow, LoadCursorW, LoadIconW,
    RegisterClassExW, SWP_NOACTIVATE, SWP_NOZORDER, SetWindowPos, WINDOW_EX_STYLE, WINDOW_STYLE,
    WNDCLASSEXW, WS_CLIPCHILDREN, WS_MAXIMIZEBOX, WS_OVERLAPPEDWINDOW, WS_THICKFRAME, WS_VISIBLE,
};
use windows::core::{HSTRING, PCWSTR};

use crate::backend::{PlatformBackend, PlatformWindow};
use crate::error::{PlatformError, Result as PlatformResult};
use crate::types::{NativeWindowId, PlatformCapability, Rect, WindowConfig, WindowFlags};

const WINDOW_CLASS_NAME: &str = "WindowDuct_PlatformWindowClass";

pub struct Win32Backend;

impl Win32Backend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Win32Backend {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBackend for Win32Backend {
    fn name(&self) -> &'static str {
        "win32"
    }

    fn supports(&self, capability: PlatformCapability) -> bool {
        match capability {
            PlatformCapability::ForeignWindows => true,
            PlatformCapability::NativeWindowCreation => true,
        }
    }

    fn create_window(&self, config: &WindowConfig) -> PlatformResult<Box<dyn PlatformWindow>> {
        let instance = module_instance()?;
        ensure_window_class(instance)?;

        let class_name = HSTRING::from(WINDOW_CLASS_NAME);
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                &class_name,
                &HSTRING::from(config.title.as_str()),
                style_for(config.flags),
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                config.width,
                config.height,
                None, // Parent window (None for top-level)
                None, // Menu
                Some(instance),
                None,
            )?
        };
        log::debug!(
            "Win32: created window {hwnd:?} ('{}', {}x{}).",
            config.title,
            config.width,
            config.height
        );
        Ok(Box::new(Win32Window {
            hwnd_bits: hwnd.0 as isize,
            owns: true,
        }))
    }

    fn adopt_foreign_window(
        &self,
        native_id: NativeWindowId,
    ) -> PlatformResult<Box<dyn PlatformWindow>> {
        let hwnd = hwnd_from_native_id(native_id);
        if hwnd.is_invalid() || !unsafe { IsWindow(Some(hwnd)) }.as_bool() {
            return Err(PlatformError::InvalidHandle(format!(
                "no native window behind {native_id:?}"
            )));
        }
        // Binding only: no SetWindowPos, ShowWindow, or SetParent here. The
        // HWND keeps whatever state its owner gave it.
        log::debug!("Win32: bound foreign window {hwnd:?} without taking ownership.");
        Ok(Box::new(Win32Window {
            hwnd_bits: native_id.raw(),
            owns: false,
        }))
    }
}

/*
 * Binding to one HWND. `owns` separates the two regimes: toolkit-created
 * windows are destroyed with their binding, adopted ones are left to their
 * external owner.
 */
struct Win32Window {
    hwnd_bits: isize,
    owns: bool,
}

impl Win32Window {
    fn hwnd(&self) -> HWND {
        HWND(self.hwnd_bits as *mut c_void)
    }
}

impl PlatformWindow for Win32Window {
    fn native_id(&self) -> NativeWindowId {
        NativeWindowId::new(self.hwnd_bits)
    }

    fn is_valid(&self) -> bool {
        unsafe { IsWindow(Some(self.hwnd())) }.as_bool()
    }

    fn geometry(&self) -> PlatformResult<Rect> {
        let mut rc = RECT::default();
        unsafe { GetWindowRect(self.hwnd(), &mut rc) }?;
        Ok(rect_from_win32(rc))
    }

    fn set_geometry(&self, rect: Rect) -> PlatformResult<()> {
        unsafe {
            SetWindowPos(
                self.hwnd(),
                None,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                SWP_NOZORDER | SWP_NOACTIVATE,
            )?;
        }
        Ok(())
    }

    fn owns_native_window(&self) -> bool {
        self.owns
    }
}

impl Drop for Win32Window {
    fn drop(&mut self) {
        if !self.owns {
            // Adopted handle: when it dies is its owner's call, not ours.
            return;
        }
        let hwnd = self.hwnd();
        if !hwnd.is_invalid() && unsafe { IsWindow(Some(hwnd)) }.as_bool() {
            if let Err(err) = unsafe { DestroyWindow(hwnd) } {
                log::warn!("Win32: DestroyWindow failed for {hwnd:?}: {err:?}");
            }
        }
    }
}

fn module_instance() -> PlatformResult<HINSTANCE> {
    let module = unsafe { GetModuleHandleW(None) }.map_err(|err| {
        PlatformError::InitializationFailed(format!("GetModuleHandleW failed: {err:?}"))
    })?;
    Ok(module.into())
}

/*
 * Registers the window class for toolkit-owned windows if not already
 * registered. Probing with GetClassInfoExW keeps the call idempotent across
 * multiple backend instances in one process.
 */
fn ensure_window_class(instance: HINSTANCE) -> PlatformResult<()> {
    let class_name = HSTRING::from(WINDOW_CLASS_NAME);
    let class_name_pcwstr = PCWSTR(class_name.as_ptr());

    unsafe {
        let mut wc_probe = WNDCLASSEXW::default();
        if GetClassInfoExW(Some(instance), class_name_pcwstr, &mut wc_probe).is_ok() {
            return Ok(());
        }

        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(duct_wnd_proc),
            hInstance: instance,
            hIcon: LoadIconW(None, IDI_APPLICATION)?,
            hCursor: LoadCursorW(None, IDC_ARROW)?,
            hbrBackground: HBRUSH((COLOR_WINDOW.0 + 1) as *mut c_void),
            lpszClassName: class_name_pcwstr,
            ..Default::default()
        };

        if RegisterClassExW(&wc) == 0 {
            let error = GetLastError();
            log::error!("Win32: RegisterClassExW failed: {error:?}");
            Err(PlatformError::InitializationFailed(format!(
                "RegisterClassExW failed: {error:?}"
            )))
        } else {
            log::debug!("Win32: window class '{WINDOW_CLASS_NAME}' registered.");
            Ok(())
        }
    }
}

// This layer does no message routing; windows it creates run on default
// handling.
unsafe extern "system" fn duct_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

fn style_for(flags: WindowFlags) -> WINDOW_STYLE {
    let mut style = WS_OVERLAPPEDWINDOW | WS_CLIPCHILDREN;
    if !flags.contains(WindowFlags::RESIZABLE) {
        style &= !(WS_THICKFRAME | WS_MAXIMIZEBOX);
    }
    if flags.contains(WindowFlags::VISIBLE) {
        style |= WS_VISIBLE;
    }
    style
}

fn hwnd_from_native_id(native_id: NativeWindowId) -> HWND {
    HWND(native_id.raw() as *mut c_void)
}

fn rect_from_win32(rc: RECT) -> Rect {
    Rect::new(rc.left, rc.top, rc.right - rc.left, rc.bottom - rc.top)
}

#[cfg(test)]
mod tests {
    use super::*;

    /*
     * Unit tests using dummy HWND values; no live Win32 calls.
     */

    #[test]
    fn hwnd_bits_round_trip_through_native_id() {
        let hwnd = HWND(0x1234 as *mut c_void);
        let native_id = NativeWindowId::new(hwnd.0 as isize);
        assert_eq!(hwnd_from_native_id(native_id), hwnd);
        assert_eq!(native_id.raw(), 0x1234);
    }

    #[test]
    fn win32_rect_converts_to_position_plus_size() {
        let rc = RECT {
            left: 123,
            top: 456,
            right: 123 + 321,
            bottom: 456 + 654,
        };
        assert_eq!(rect_from_win32(rc), Rect::new(123, 456, 321, 654));
    }

    #[test]
    fn fixed_size_style_drops_resize_frame() {
        let style = style_for(WindowFlags::VISIBLE);
        assert_eq!(style.0 & WS_THICKFRAME.0, 0);
        assert_eq!(style.0 & WS_MAXIMIZEBOX.0, 0);
        assert_ne!(style.0 & WS_VISIBLE.0, 0);

        let resizable = style_for(WindowFlags::VISIBLE | WindowFlags::RESIZABLE);
        assert_ne!(resizable.0 & WS_THICKFRAME.0, 0);
    }

    #[test]
    fn adopted_binding_reports_no_ownership() {
        let binding = Win32Window {
            hwnd_bits: 0x4242,
            owns: false,
        };
        assert!(!binding.owns_native_window());
        assert_eq!(binding.native_id(), NativeWindowId::new(0x4242));
    }
}
