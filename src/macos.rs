//! macOS backend. The fast path binds the private DisplayServices framework
//! at runtime (it only exists on Apple silicon era systems). The generic
//! path walks IOKit's `IODisplayConnect` services.

use std::{
    ffi::{c_char, c_void, CStr},
    ptr,
};

use core_foundation::{
    base::TCFType,
    string::{CFString, CFStringRef},
};
use core_graphics::display::CGMainDisplayID;
use libloading::os::unix::{Library, RTLD_LOCAL, RTLD_NOW};

use crate::{
    BrightnessQuery, CapabilityProvider, DisplayId, DisplayService,
    QueryError, ServiceRegistry,
};

const DISPLAY_SERVICES_PATH: &str =
    "/System/Library/PrivateFrameworks/DisplayServices.framework/DisplayServices";
const GET_BRIGHTNESS_SYMBOL: &[u8] = b"DisplayServicesGetBrightness\0";

const DISPLAY_CONNECT_CLASS: &CStr = c"IODisplayConnect";
// kIODisplayBrightnessKey
const BRIGHTNESS_KEY: &str = "brightness";

#[allow(non_camel_case_types)]
type kern_return_t = i32;
#[allow(non_camel_case_types)]
type mach_port_t = u32;
#[allow(non_camel_case_types)]
type io_object_t = mach_port_t;

const KERN_SUCCESS: kern_return_t = 0;
// kIOMainPortDefault is MACH_PORT_NULL.
const MAIN_PORT_DEFAULT: mach_port_t = 0;

#[link(name = "IOKit", kind = "framework")]
extern "C" {
    fn IOServiceMatching(name: *const c_char) -> *mut c_void;
    fn IOServiceGetMatchingServices(
        main_port: mach_port_t,
        matching: *mut c_void,
        existing: *mut io_object_t,
    ) -> kern_return_t;
    fn IOIteratorNext(iterator: io_object_t) -> io_object_t;
    fn IOObjectRelease(object: io_object_t) -> kern_return_t;
    fn IODisplayGetFloatParameter(
        service: io_object_t,
        options: u32,
        parameter_name: CFStringRef,
        value: *mut f32,
    ) -> kern_return_t;
}

type GetBrightnessFn =
    unsafe extern "C" fn(display: DisplayId, brightness: *mut f32) -> i32;

pub struct DisplayServices;

impl CapabilityProvider for DisplayServices {
    type Query = DisplayServicesQuery;

    fn bind(&self) -> Result<DisplayServicesQuery, QueryError> {
        // SAFETY: DisplayServices is a system framework whose initializers
        // have no preconditions.
        let library = unsafe {
            Library::open(Some(DISPLAY_SERVICES_PATH), RTLD_NOW | RTLD_LOCAL)
        }
        .map_err(|err| QueryError::CapabilityUnavailable(err.to_string()))?;

        // SAFETY: The signature matches DisplayServicesGetBrightness. The
        // pointer is only called while `library` is loaded because both live
        // in the same `DisplayServicesQuery`.
        let get_brightness = unsafe {
            library.get::<GetBrightnessFn>(GET_BRIGHTNESS_SYMBOL)
        }
        .map(|symbol| *symbol)
        .map_err(|err| QueryError::CapabilityUnavailable(err.to_string()))?;

        Ok(DisplayServicesQuery {
            get_brightness,
            _library: library,
        })
    }

    fn primary_display(&self) -> DisplayId {
        // SAFETY: CGMainDisplayID has no preconditions.
        unsafe { CGMainDisplayID() }
    }
}

/// A bound DisplayServicesGetBrightness. The framework is unloaded when
/// this is dropped.
pub struct DisplayServicesQuery {
    get_brightness: GetBrightnessFn,
    _library: Library,
}

impl BrightnessQuery for DisplayServicesQuery {
    fn query(&self, display: DisplayId) -> Result<f32, QueryError> {
        let mut brightness: f32 = 0.0;
        // SAFETY: The library is still loaded and the out pointer is valid
        // for the duration of the call.
        let status = unsafe {
            (self.get_brightness)(display, ptr::addr_of_mut!(brightness))
        };
        if status != 0 {
            return Err(QueryError::Rejected(status));
        }

        Ok(brightness)
    }
}

pub struct IoRegistry;

impl ServiceRegistry for IoRegistry {
    type Service = DisplayConnect;
    type Services = DisplayConnects;

    fn display_services(&self) -> Result<DisplayConnects, QueryError> {
        let mut iterator: io_object_t = 0;
        // SAFETY: The class name is null-terminated and
        // IOServiceGetMatchingServices consumes the matching dictionary,
        // including a null one.
        let status = unsafe {
            let matching = IOServiceMatching(DISPLAY_CONNECT_CLASS.as_ptr());
            IOServiceGetMatchingServices(
                MAIN_PORT_DEFAULT,
                matching,
                ptr::addr_of_mut!(iterator),
            )
        };
        if status != KERN_SUCCESS {
            return Err(QueryError::Registry(status));
        }

        Ok(DisplayConnects {
            iterator,
            key: CFString::from_static_string(BRIGHTNESS_KEY),
        })
    }
}

/// An IOKit iterator over `IODisplayConnect` services.
pub struct DisplayConnects {
    iterator: io_object_t,
    key: CFString,
}

impl Iterator for DisplayConnects {
    type Item = DisplayConnect;

    fn next(&mut self) -> Option<DisplayConnect> {
        // SAFETY: The iterator is owned by `self` and hasn't been released.
        let service = unsafe { IOIteratorNext(self.iterator) };
        if service == 0 {
            return None;
        }

        Some(DisplayConnect {
            service,
            key: self.key.clone(),
        })
    }
}

impl Drop for DisplayConnects {
    fn drop(&mut self) {
        // SAFETY: The iterator is released exactly once, here.
        unsafe {
            IOObjectRelease(self.iterator);
        }
    }
}

pub struct DisplayConnect {
    service: io_object_t,
    key: CFString,
}

impl DisplayService for DisplayConnect {
    fn brightness(&self) -> Result<f32, QueryError> {
        let mut brightness: f32 = 0.0;
        // SAFETY: The service is live, the key is a valid CFString and the
        // out pointer is valid for the duration of the call.
        let status = unsafe {
            IODisplayGetFloatParameter(
                self.service,
                0,
                self.key.as_concrete_TypeRef(),
                ptr::addr_of_mut!(brightness),
            )
        };
        if status != KERN_SUCCESS {
            return Err(QueryError::Rejected(status));
        }

        Ok(brightness)
    }
}

impl Drop for DisplayConnect {
    fn drop(&mut self) {
        // SAFETY: Each service returned by IOIteratorNext is released exactly
        // once, here.
        unsafe {
            IOObjectRelease(self.service);
        }
    }
}

pub fn capability_provider() -> DisplayServices {
    DisplayServices
}

pub fn service_registry() -> IoRegistry {
    IoRegistry
}
