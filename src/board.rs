//! Board bring-up
//!
//! Brings the timekeeping peripherals up in a fixed order (tick service,
//! GPIO, RTC) and hands back the drivers the radio stack runs on.
//!
//! ## Usage
//!
//! ```
//! use node_timekeeper::board::Board;
//! use node_timekeeper::config::NodeConfig;
//! use node_timekeeper::platform::mock::MockPlatform;
//! use node_timekeeper::subsystems::gpio::HandlerTable;
//!
//! let handlers = HandlerTable::new();
//! let board: Board<'_, '_, MockPlatform> =
//!     Board::bring_up(NodeConfig::default(), &handlers, None).unwrap();
//! assert_eq!(board.rtc.timestamp(), 0);
//! ```

use crate::config::NodeConfig;
use crate::core::traits::Notifiable;
use crate::platform::{
    traits::{Platform, TickServiceInterface},
    Result,
};
use crate::subsystems::{
    gpio::{Gpio, HandlerTable},
    rtc::Rtc,
    timer::SoftwareTimer,
};
use crate::{log_error, log_info};

/// Initialized timekeeping drivers
pub struct Board<'t, 'a, P: Platform<'a>> {
    /// Monotonic clock and wakeup scheduler
    pub rtc: Rtc<'a, P::Counter>,
    /// Tick service backing the software timers
    pub ticks: P::TickService,
    /// GPIO driver and its dispatch table
    pub gpio: Gpio<'t, 'a, P::Gpio>,
    config: NodeConfig,
}

impl<'t, 'a, P: Platform<'a>> Board<'t, 'a, P> {
    /// Initialize the platform, then the drivers on top of it
    ///
    /// # Errors
    ///
    /// Returns the platform's initialization error or any error from
    /// [`Board::init`].
    pub fn bring_up(
        config: NodeConfig,
        handlers: &'t HandlerTable<'a>,
        wakeup: Option<&'a dyn Notifiable>,
    ) -> Result<Self> {
        let platform = P::init().inspect_err(|e| log_error!("board: platform init failed: {}", e))?;
        Self::init(platform, config, handlers, wakeup)
    }

    /// Bring up the drivers on an initialized platform
    ///
    /// `handlers` is cleared before the GPIO driver takes it. `wakeup` is
    /// the RTC compare-match handler.
    ///
    /// # Errors
    ///
    /// Returns the first driver initialization error; the caller decides
    /// whether to halt.
    pub fn init(
        platform: P,
        config: NodeConfig,
        handlers: &'t HandlerTable<'a>,
        wakeup: Option<&'a dyn Notifiable>,
    ) -> Result<Self> {
        log_info!("board: version {}", env!("CARGO_PKG_VERSION"));
        log_info!("board: HW init start");

        let (counter, ticks, gpio_hw) = platform.split();
        log_info!(
            "board: tick service {} Hz, min {} ticks",
            ticks.tick_hz(),
            ticks.min_timeout_ticks()
        );

        handlers.clear();
        let gpio = Gpio::new(gpio_hw, handlers);

        let mut rtc = Rtc::new(counter, config.rtc);
        rtc.init(wakeup)
            .inspect_err(|e| log_error!("board: rtc init failed: {}", e))?;

        log_info!("board: HW init done");
        Ok(Self {
            rtc,
            ticks,
            gpio,
            config,
        })
    }

    /// Create a software timer bound to `handler`, using the board's
    /// timeout floor
    ///
    /// # Errors
    ///
    /// Returns `TimerError::PoolExhausted` when no tick slot is left.
    pub fn create_timer(&mut self, handler: &'a dyn Notifiable) -> Result<SoftwareTimer> {
        let mut timer = SoftwareTimer::with_config(self.config.timer);
        timer.init(&mut self.ticks, handler)?;
        Ok(timer)
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }
}
