//! The generic path: walk the OS device-service registry for display
//! connections and take the first one that reports a brightness.

use tracing::debug;

use crate::{BrightnessReading, QueryError};

/// A display-connection service object. Dropping it releases the object.
pub trait DisplayService {
    fn brightness(&self) -> Result<f32, QueryError>;
}

pub trait ServiceRegistry {
    type Service: DisplayService;
    /// The enumeration handle. Dropping it releases the handle.
    type Services: Iterator<Item = Self::Service>;

    /// Enumerates display-connection services in registry order.
    fn display_services(&self) -> Result<Self::Services, QueryError>;
}

/// Returns the first successful reading among the registry's display
/// services. Services that fail are skipped.
pub fn try_generic_query<R: ServiceRegistry>(
    registry: &R,
) -> Option<BrightnessReading> {
    let services = match registry.display_services() {
        Ok(services) => services,
        Err(err) => {
            debug!("generic query skipped: {err}");
            return None;
        }
    };

    for (index, service) in services.enumerate() {
        match service.brightness().and_then(BrightnessReading::new) {
            Ok(reading) => {
                debug!(
                    index,
                    fraction = reading.fraction(),
                    "generic query succeeded"
                );
                return Some(reading);
            }
            Err(err) => debug!(index, "skipping display service: {err}"),
        }
    }

    debug!("no display service reported a brightness");
    None
}
