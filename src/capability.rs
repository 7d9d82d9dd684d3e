//! The fast path: an optional, dynamically bound brightness capability.

use tracing::debug;

use crate::{BrightnessReading, DisplayId, QueryError};

/// A bound capability that can read the brightness of a display.
///
/// Implementors own whatever the binding acquired and release it when
/// dropped.
pub trait BrightnessQuery {
    fn query(&self, display: DisplayId) -> Result<f32, QueryError>;
}

/// Binds a [`BrightnessQuery`] on demand.
///
/// `bind` returns `Err` when the capability doesn't exist on the running
/// system. Nothing is cached between calls.
pub trait CapabilityProvider {
    type Query: BrightnessQuery;

    fn bind(&self) -> Result<Self::Query, QueryError>;

    fn primary_display(&self) -> DisplayId;
}

/// Reads the primary display's brightness through the provider's
/// capability, or returns `None` if it's unbound or the query fails.
pub fn try_fast_query<P: CapabilityProvider>(
    provider: &P,
) -> Option<BrightnessReading> {
    let capability = match provider.bind() {
        Ok(capability) => capability,
        Err(err) => {
            debug!("fast query skipped: {err}");
            return None;
        }
    };

    let display_id = provider.primary_display();
    match capability.query(display_id).and_then(BrightnessReading::new) {
        Ok(reading) => {
            debug!(
                display_id,
                fraction = reading.fraction(),
                "fast query succeeded"
            );
            Some(reading)
        }
        Err(err) => {
            debug!(display_id, "fast query failed: {err}");
            None
        }
    }
}
