use tracing::debug;

use crate::{
    try_fast_query, try_generic_query, BrightnessReading, CapabilityProvider,
    ServiceRegistry,
};

/// Resolves the primary display's brightness by trying the fast capability
/// first and falling back to the registry walk.
pub struct Resolver<P, R> {
    provider: P,
    registry: R,
}

impl<P: CapabilityProvider, R: ServiceRegistry> Resolver<P, R> {
    pub fn new(provider: P, registry: R) -> Resolver<P, R> {
        Resolver { provider, registry }
    }

    /// The registry is only consulted when the fast query yields nothing.
    pub fn resolve(&self) -> Option<BrightnessReading> {
        if let Some(reading) = try_fast_query(&self.provider) {
            return Some(reading);
        }

        debug!("falling back to the display service registry");
        try_generic_query(&self.registry)
    }

    pub fn resolve_percent(&self) -> Option<u8> {
        self.resolve().map(BrightnessReading::percent)
    }
}
