//! Reads the brightness of the primary display as a percentage.
//!
//! Two strategies are tried in order: a fast capability that is bound at
//! runtime when the platform has it, then a walk over the OS registry of
//! display services. Every failure along the way is absorbed, so callers
//! only ever see a percentage or nothing.

mod capability;
mod error;
mod reading;
mod registry;
mod resolve;
#[cfg(test)]
mod testing;

#[cfg(target_os = "macos")]
#[path = "macos.rs"]
mod platform;
#[cfg(not(target_os = "macos"))]
#[path = "unsupported.rs"]
mod platform;

use std::io;

pub use capability::{try_fast_query, BrightnessQuery, CapabilityProvider};
pub use error::QueryError;
pub use reading::{BrightnessReading, DisplayId};
pub use registry::{try_generic_query, DisplayService, ServiceRegistry};
pub use resolve::Resolver;

/// Returns the primary display's brightness in percent using the backend
/// for the current platform.
pub fn main_display_brightness_percent() -> Option<u8> {
    let resolver = Resolver::new(
        platform::capability_provider(),
        platform::service_registry(),
    );
    resolver.resolve_percent()
}

/// Writes `percent` as a single line. An unknown brightness is written as
/// `0`.
pub fn write_percent<W: io::Write>(
    mut writer: W,
    percent: Option<u8>,
) -> io::Result<()> {
    writeln!(writer, "{}", percent.unwrap_or(0))
}
