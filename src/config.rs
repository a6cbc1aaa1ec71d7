//! Build-time node configuration
//!
//! Timing defaults come from environment variables read by `build.rs`
//! (`NODE_RTC_FREQUENCY_HZ`, `NODE_TIMER_MIN_TIMEOUT_MS`) and are parsed
//! at compile time, so the image carries them without a settings store.

use crate::platform::{error::RtcError, Result};

/// Low-frequency clock feeding the RTC prescaler
pub const LFCLK_HZ: u32 = 32_768;

/// Largest value the 12-bit RTC prescaler register holds
pub const MAX_PRESCALER: u32 = 0x0FFF;

/// RTC tick frequency baked in at build time
pub const RTC_FREQUENCY_HZ: u32 = {
    const S: &str = env!("NODE_RTC_FREQUENCY_HZ");
    const_parse_u32(S)
};

/// Software timer floor baked in at build time
pub const TIMER_MIN_TIMEOUT_MS: u32 = {
    const S: &str = env!("NODE_TIMER_MIN_TIMEOUT_MS");
    const_parse_u32(S)
};

/// Parse a decimal u32 at compile time
/// Returns 0 for empty, non-numeric or overflowing input
const fn const_parse_u32(s: &str) -> u32 {
    let bytes = s.as_bytes();
    let mut value: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < b'0' || b > b'9' {
            return 0;
        }
        value = match value.checked_mul(10) {
            Some(v) => match v.checked_add((b - b'0') as u32) {
                Some(v) => v,
                None => return 0,
            },
            None => return 0,
        };
        i += 1;
    }
    value
}

/// RTC timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtcConfig {
    /// Counter tick frequency in Hz
    pub frequency_hz: u32,
    /// Clock feeding the prescaler in Hz
    pub base_clock_hz: u32,
}

impl RtcConfig {
    /// Configuration for `frequency_hz` off the 32.768 kHz LFCLK
    pub const fn new(frequency_hz: u32) -> Self {
        Self {
            frequency_hz,
            base_clock_hz: LFCLK_HZ,
        }
    }

    /// Prescaler register value producing `frequency_hz`
    ///
    /// # Errors
    ///
    /// Returns `RtcError::InvalidFrequency` if the frequency is zero, does
    /// not divide the base clock, or needs more than 12 prescaler bits.
    pub fn prescaler(&self) -> Result<u16> {
        if self.frequency_hz == 0 || !self.base_clock_hz.is_multiple_of(self.frequency_hz) {
            return Err(RtcError::InvalidFrequency.into());
        }
        let prescaler = self.base_clock_hz / self.frequency_hz - 1;
        if prescaler > MAX_PRESCALER {
            return Err(RtcError::InvalidFrequency.into());
        }
        Ok(prescaler as u16)
    }
}

impl Default for RtcConfig {
    fn default() -> Self {
        Self::new(RTC_FREQUENCY_HZ)
    }
}

/// Software timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    /// Lower bound applied by `SoftwareTimer::set_timeout`
    pub min_timeout_ms: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            min_timeout_ms: TIMER_MIN_TIMEOUT_MS,
        }
    }
}

/// Node-wide timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeConfig {
    pub rtc: RtcConfig,
    pub timer: TimerConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PlatformError;

    #[test]
    fn test_const_parse_u32() {
        assert_eq!(const_parse_u32("8"), 8);
        assert_eq!(const_parse_u32("32768"), 32_768);
        assert_eq!(const_parse_u32(""), 0);
        assert_eq!(const_parse_u32("1O"), 0);
        assert_eq!(const_parse_u32("99999999999"), 0);
    }

    #[test]
    fn test_prescaler_values() {
        assert_eq!(RtcConfig::new(8).prescaler(), Ok(4095));
        assert_eq!(RtcConfig::new(1024).prescaler(), Ok(31));
        assert_eq!(RtcConfig::new(32_768).prescaler(), Ok(0));
    }

    #[test]
    fn test_prescaler_rejects_invalid_frequencies() {
        let invalid = Err(PlatformError::Rtc(RtcError::InvalidFrequency));
        assert_eq!(RtcConfig::new(0).prescaler(), invalid);
        assert_eq!(RtcConfig::new(3).prescaler(), invalid);
        // 32768 / 4 - 1 needs 13 bits
        assert_eq!(RtcConfig::new(4).prescaler(), invalid);
    }

    #[test]
    fn test_build_time_defaults() {
        let config = NodeConfig::default();
        assert_eq!(config.rtc.frequency_hz, RTC_FREQUENCY_HZ);
        assert_eq!(config.rtc.base_clock_hz, LFCLK_HZ);
        assert_eq!(config.timer.min_timeout_ms, TIMER_MIN_TIMEOUT_MS);
    }
}
