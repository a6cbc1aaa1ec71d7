//! GPIO event dispatch subsystem
//!
//! Configures pins as inputs or outputs and routes edge events from the
//! shared pin-change interrupt to per-pin handlers.
//!
//! ## Pin lifecycle
//!
//! ```text
//!  Unconfigured ──configure──► Configured(mode) ──arm_interrupt──► InterruptArmed
//!        ▲                        │      ▲                              │
//!        └────────deinit──────────┘      └───────disarm_interrupt───────┘
//! ```
//!
//! Arming is only valid for inputs. Re-configuring a pin needs `deinit`
//! first. Operations on a pin in the wrong state are rejected with
//! `GpioError::InvalidMode` and never reach the peripheral.
//!
//! ## Usage
//!
//! ```
//! use node_timekeeper::platform::mock::MockGpio;
//! use node_timekeeper::subsystems::gpio::{
//!     Gpio, GpioPin, HandlerTable, IrqMode, IrqPriority, PinMode, PinPull,
//! };
//!
//! let on_dio0 = || {};
//! let handlers = HandlerTable::new();
//! let mut gpio = Gpio::new(MockGpio::new(), &handlers);
//!
//! let mut dio0 = GpioPin::new(5);
//! gpio.configure(&mut dio0, PinMode::Input, PinPull::None, false).unwrap();
//! gpio.arm_interrupt(&mut dio0, IrqMode::RisingEdge, IrqPriority::High, &on_dio0)
//!     .unwrap();
//!
//! if let Some(edge) = gpio.hw_mut().inject_level(5, true) {
//!     assert!(handlers.dispatch(5, edge));
//! }
//! ```

pub mod handlers;

pub use handlers::HandlerTable;

use crate::core::traits::Notifiable;
use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{GpioInterface, Polarity, Pull},
    Result,
};
use crate::{log_debug, log_error};

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    Input,
    Output,
}

/// Pull resistor requested for a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinPull {
    #[default]
    None,
    PullUp,
    PullDown,
}

impl From<PinPull> for Pull {
    fn from(pull: PinPull) -> Self {
        match pull {
            PinPull::None => Pull::None,
            PinPull::PullUp => Pull::Up,
            PinPull::PullDown => Pull::Down,
        }
    }
}

/// Edges that raise a pin interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrqMode {
    #[default]
    None,
    RisingEdge,
    FallingEdge,
    BothEdges,
}

impl IrqMode {
    /// Hardware sense setting for this mode (`None` for `IrqMode::None`)
    pub fn sense(self) -> Option<Polarity> {
        match self {
            IrqMode::None => None,
            IrqMode::RisingEdge => Some(Polarity::LowToHigh),
            IrqMode::FallingEdge => Some(Polarity::HighToLow),
            IrqMode::BothEdges => Some(Polarity::Toggle),
        }
    }
}

/// Requested interrupt priority
///
/// All pins share one pin-change vector whose priority is fixed when the
/// peripheral is brought up, so this is recorded per pin but does not
/// reprogram the NVIC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrqPriority {
    VeryLow,
    Low,
    #[default]
    Medium,
    High,
    VeryHigh,
}

/// Lifecycle state of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    Unconfigured,
    Configured(PinMode),
    InterruptArmed,
}

/// Caller-owned pin descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioPin {
    pin: u8,
    mode: Option<PinMode>,
    pull: PinPull,
    irq_mode: IrqMode,
    irq_priority: IrqPriority,
    initialized: bool,
    armed: bool,
}

impl GpioPin {
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            mode: None,
            pull: PinPull::None,
            irq_mode: IrqMode::None,
            irq_priority: IrqPriority::Medium,
            initialized: false,
            armed: false,
        }
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Mode from the last `configure` (kept across `deinit`)
    pub fn mode(&self) -> Option<PinMode> {
        self.mode
    }

    pub fn pull(&self) -> PinPull {
        self.pull
    }

    pub fn irq_mode(&self) -> IrqMode {
        self.irq_mode
    }

    pub fn irq_priority(&self) -> IrqPriority {
        self.irq_priority
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn state(&self) -> PinState {
        match (self.initialized, self.mode) {
            (true, _) if self.armed => PinState::InterruptArmed,
            (true, Some(mode)) => PinState::Configured(mode),
            _ => PinState::Unconfigured,
        }
    }

    fn is(&self, mode: PinMode) -> bool {
        self.initialized && self.mode == Some(mode)
    }
}

/// GPIO driver
///
/// Owns the GPIO peripheral and borrows the handler table that the
/// pin-change interrupt dispatches through.
pub struct Gpio<'t, 'a, G: GpioInterface> {
    hw: G,
    handlers: &'t HandlerTable<'a>,
}

impl<'t, 'a, G: GpioInterface> Gpio<'t, 'a, G> {
    pub fn new(hw: G, handlers: &'t HandlerTable<'a>) -> Self {
        Self { hw, handlers }
    }

    /// Configure `pin` as an input or output
    ///
    /// Inputs sense both edges with the requested pull and no interrupt;
    /// outputs start at `initial_high`.
    ///
    /// # Errors
    ///
    /// Returns `GpioError::PinInUse` if the pin is already configured, or
    /// the peripheral's configuration error.
    pub fn configure(
        &mut self,
        pin: &mut GpioPin,
        mode: PinMode,
        pull: PinPull,
        initial_high: bool,
    ) -> Result<()> {
        log_debug!("gpio: init {} {:?} {:?}", pin.pin, mode, pull);
        if pin.initialized {
            log_error!("gpio: pin {} already configured", pin.pin);
            return Err(GpioError::PinInUse.into());
        }

        let result = match mode {
            PinMode::Input => self.hw.configure_input(pin.pin, Polarity::Toggle, pull.into()),
            PinMode::Output => self.hw.configure_output(pin.pin, initial_high),
        };
        result.inspect_err(|e| log_error!("gpio: init {} error: {}", pin.pin, e))?;

        pin.mode = Some(mode);
        pin.pull = pull;
        pin.irq_mode = IrqMode::None;
        pin.armed = false;
        pin.initialized = true;
        Ok(())
    }

    /// Route `irq_mode` edges on an input pin to `handler`
    ///
    /// An already configured pin is released, its previous handler
    /// dropped, and configured again with the edge-specific sense, keeping
    /// its pull. The handler is installed before the event is enabled.
    ///
    /// # Errors
    ///
    /// Returns `GpioError::InvalidMode` for a pin never configured as an
    /// input, `PlatformError::InvalidConfig` for `IrqMode::None`, or the
    /// peripheral's configuration error (the pin is then left
    /// unconfigured).
    pub fn arm_interrupt(
        &mut self,
        pin: &mut GpioPin,
        irq_mode: IrqMode,
        priority: IrqPriority,
        handler: &'a dyn Notifiable,
    ) -> Result<()> {
        log_debug!("gpio: set_interrupt {} {:?} {:?}", pin.pin, irq_mode, priority);
        if pin.mode != Some(PinMode::Input) {
            log_error!("gpio: wrong pin state {}", pin.pin);
            return Err(GpioError::InvalidMode.into());
        }
        let Some(sense) = irq_mode.sense() else {
            log_error!("gpio: no edge selected for pin {}", pin.pin);
            return Err(PlatformError::InvalidConfig);
        };

        if pin.initialized {
            self.hw.release_input(pin.pin);
            self.handlers.remove(pin.pin);
            pin.initialized = false;
            pin.armed = false;
        }

        self.hw
            .configure_input(pin.pin, sense, pin.pull.into())
            .inspect_err(|e| log_error!("gpio: init {} error: {}", pin.pin, e))?;

        if let Err(e) = self.handlers.register(pin.pin, handler) {
            self.hw.release_input(pin.pin);
            return Err(e);
        }
        self.hw.enable_event(pin.pin, true);

        pin.irq_mode = irq_mode;
        pin.irq_priority = priority;
        pin.initialized = true;
        pin.armed = true;
        Ok(())
    }

    /// Stop edge events on an input pin, keeping its handler
    ///
    /// Disarming a pin that is not armed is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `GpioError::InvalidMode` unless the pin is a configured
    /// input.
    pub fn disarm_interrupt(&mut self, pin: &mut GpioPin) -> Result<()> {
        log_debug!("gpio: remove_interrupt {}", pin.pin);
        if !pin.is(PinMode::Input) {
            log_error!("gpio: wrong pin state {}", pin.pin);
            return Err(GpioError::InvalidMode.into());
        }
        if pin.armed {
            self.hw.disable_event(pin.pin);
            pin.armed = false;
        }
        Ok(())
    }

    /// Drive an output pin
    ///
    /// # Errors
    ///
    /// Returns `GpioError::InvalidMode` unless the pin is a configured
    /// output.
    pub fn write(&mut self, pin: &GpioPin, high: bool) -> Result<()> {
        log_debug!("gpio: write {} {}", pin.pin, high);
        self.expect_mode(pin, PinMode::Output)?;
        if high {
            self.hw.set_high(pin.pin);
        } else {
            self.hw.set_low(pin.pin);
        }
        Ok(())
    }

    /// Invert an output pin
    ///
    /// # Errors
    ///
    /// Returns `GpioError::InvalidMode` unless the pin is a configured
    /// output.
    pub fn toggle(&mut self, pin: &GpioPin) -> Result<()> {
        log_debug!("gpio: toggle {}", pin.pin);
        self.expect_mode(pin, PinMode::Output)?;
        self.hw.toggle(pin.pin);
        Ok(())
    }

    /// Read an input pin's level
    ///
    /// # Errors
    ///
    /// Returns `GpioError::InvalidMode` unless the pin is a configured
    /// input.
    pub fn read(&self, pin: &GpioPin) -> Result<bool> {
        self.expect_mode(pin, PinMode::Input)?;
        Ok(self.hw.is_high(pin.pin))
    }

    /// Release the pin and clear its handler
    ///
    /// A pin that is not configured is left alone.
    pub fn deinit(&mut self, pin: &mut GpioPin) -> Result<()> {
        log_debug!("gpio: deinit {}", pin.pin);
        if !pin.initialized {
            log_debug!("gpio: wrong pin state {}", pin.pin);
            return Ok(());
        }
        match pin.mode {
            Some(PinMode::Input) => self.hw.release_input(pin.pin),
            Some(PinMode::Output) => self.hw.release_output(pin.pin),
            None => {}
        }
        self.handlers.remove(pin.pin);
        pin.initialized = false;
        pin.armed = false;
        Ok(())
    }

    /// Handler table shared with the interrupt vector
    pub fn handlers(&self) -> &'t HandlerTable<'a> {
        self.handlers
    }

    pub fn hw(&self) -> &G {
        &self.hw
    }

    pub fn hw_mut(&mut self) -> &mut G {
        &mut self.hw
    }

    fn expect_mode(&self, pin: &GpioPin, mode: PinMode) -> Result<()> {
        if pin.is(mode) {
            Ok(())
        } else {
            log_error!("gpio: wrong pin state {}", pin.pin);
            Err(GpioError::InvalidMode.into())
        }
    }
}
