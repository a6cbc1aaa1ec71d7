//! Platform error types
//!
//! This module defines error types for platform and subsystem operations.

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// Peripheral adapters and the subsystems layered on them report every
/// failure through these variants. None of them is fatal by itself; the
/// caller decides whether to halt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlatformError {
    /// RTC counter or wakeup operation failed
    Rtc(RtcError),
    /// Software timer operation failed
    Timer(TimerError),
    /// GPIO operation failed
    Gpio(GpioError),
    /// Platform initialization failed
    InitializationFailed,
    /// Invalid configuration provided
    InvalidConfig,
}

/// RTC-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError {
    /// Operation requires `Rtc::init` first
    NotInitialized,
    /// Frequency does not map onto a valid prescaler
    InvalidFrequency,
    /// Requested wakeup is further away than one counter period
    TimeoutTooLong,
}

/// Software timer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerError {
    /// Timer was declared but never bound to a tick slot
    NotInitialized,
    /// Timer is already bound to a tick slot
    AlreadyInitialized,
    /// Timer started without a timeout
    ZeroTimeout,
    /// No free tick slot left in the pool
    PoolExhausted,
    /// Slot id does not belong to the tick service
    InvalidSlot,
}

/// GPIO-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Invalid pin number
    InvalidPin,
    /// Pin is not in the mode the operation needs ("wrong pin state")
    InvalidMode,
    /// Pin already in use
    PinInUse,
    /// Peripheral rejected the configuration
    HardwareError,
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Rtc(e) => write!(f, "RTC error: {:?}", e),
            PlatformError::Timer(e) => write!(f, "Timer error: {:?}", e),
            PlatformError::Gpio(e) => write!(f, "GPIO error: {:?}", e),
            PlatformError::InitializationFailed => write!(f, "Platform initialization failed"),
            PlatformError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

impl From<RtcError> for PlatformError {
    fn from(e: RtcError) -> Self {
        PlatformError::Rtc(e)
    }
}

impl From<TimerError> for PlatformError {
    fn from(e: TimerError) -> Self {
        PlatformError::Timer(e)
    }
}

impl From<GpioError> for PlatformError {
    fn from(e: GpioError) -> Self {
        PlatformError::Gpio(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_wraps_peripheral_error() {
        let err = PlatformError::Gpio(GpioError::InvalidMode);
        assert_eq!(format!("{}", err), "GPIO error: InvalidMode");

        let err = PlatformError::Rtc(RtcError::TimeoutTooLong);
        assert_eq!(format!("{}", err), "RTC error: TimeoutTooLong");
    }

    #[test]
    fn test_from_conversions() {
        let err: PlatformError = TimerError::ZeroTimeout.into();
        assert_eq!(err, PlatformError::Timer(TimerError::ZeroTimeout));

        let err: PlatformError = GpioError::PinInUse.into();
        assert_eq!(err, PlatformError::Gpio(GpioError::PinInUse));
    }
}
