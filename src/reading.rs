use crate::QueryError;

/// An opaque identifier for a display, as handed out by the OS.
pub type DisplayId = u32;

/// A brightness level relative to the display's maximum.
///
/// The fraction always lies in `[0.0, 1.0]`. NaN and anything outside the
/// range are rejected by [`BrightnessReading::new`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrightnessReading(f32);

impl BrightnessReading {
    pub fn new(fraction: f32) -> Result<BrightnessReading, QueryError> {
        if (0.0..=1.0).contains(&fraction) {
            Ok(BrightnessReading(fraction))
        } else {
            Err(QueryError::OutOfRange(fraction))
        }
    }

    pub fn fraction(self) -> f32 {
        self.0
    }

    /// Returns the reading as a whole percentage. The product is rounded in
    /// single precision and halves round away from zero, so 0.125 is 13.
    pub fn percent(self) -> u8 {
        // The fraction is in [0, 1], so the result always fits in 0..=100.
        (self.0 * 100.0).round() as u8
    }
}
