//! GPIO configuration and edge dispatch against the mock peripheral

use std::sync::atomic::{AtomicU32, Ordering};

use node_timekeeper::platform::mock::MockGpio;
use node_timekeeper::platform::{GpioError, PlatformError};
use node_timekeeper::subsystems::gpio::{
    Gpio, GpioPin, HandlerTable, IrqMode, IrqPriority, PinMode, PinPull, PinState,
};

/// Feed a level change through the mock and the dispatch table, the way
/// the pin-change interrupt would
fn drive(gpio: &mut Gpio<'_, '_, MockGpio>, pin: u8, high: bool) -> bool {
    match gpio.hw_mut().inject_level(pin, high) {
        Some(edge) => gpio.handlers().dispatch(pin, edge),
        None => false,
    }
}

#[test]
fn rising_edge_reaches_its_handler_only() {
    let dio0 = AtomicU32::new(0);
    let dio1 = AtomicU32::new(0);
    let on_dio0 = || {
        dio0.fetch_add(1, Ordering::SeqCst);
    };
    let on_dio1 = || {
        dio1.fetch_add(1, Ordering::SeqCst);
    };

    let handlers = HandlerTable::new();
    let mut gpio = Gpio::new(MockGpio::new(), &handlers);
    let mut pin5 = GpioPin::new(5);
    let mut pin6 = GpioPin::new(6);

    gpio.configure(&mut pin5, PinMode::Input, PinPull::None, false)
        .unwrap();
    gpio.configure(&mut pin6, PinMode::Input, PinPull::None, false)
        .unwrap();
    gpio.arm_interrupt(&mut pin5, IrqMode::RisingEdge, IrqPriority::High, &on_dio0)
        .unwrap();
    gpio.arm_interrupt(&mut pin6, IrqMode::BothEdges, IrqPriority::High, &on_dio1)
        .unwrap();

    assert!(drive(&mut gpio, 5, true));
    assert_eq!(dio0.load(Ordering::SeqCst), 1);
    assert_eq!(dio1.load(Ordering::SeqCst), 0);

    assert!(!drive(&mut gpio, 5, false));
    assert!(drive(&mut gpio, 6, true));
    assert!(drive(&mut gpio, 6, false));
    assert_eq!(dio0.load(Ordering::SeqCst), 1);
    assert_eq!(dio1.load(Ordering::SeqCst), 2);
}

#[test]
fn unregistered_pin_event_is_ignored() {
    let handlers = HandlerTable::new();
    let mut gpio = Gpio::new(MockGpio::new(), &handlers);
    let mut pin = GpioPin::new(20);

    gpio.configure(&mut pin, PinMode::Input, PinPull::None, false)
        .unwrap();
    assert!(!drive(&mut gpio, 20, true));
    assert!(!handlers.dispatch(20, node_timekeeper::platform::traits::Polarity::LowToHigh));
}

#[test]
fn disarm_then_rearm() {
    let count = AtomicU32::new(0);
    let handler = || {
        count.fetch_add(1, Ordering::SeqCst);
    };
    let handlers = HandlerTable::new();
    let mut gpio = Gpio::new(MockGpio::new(), &handlers);
    let mut pin = GpioPin::new(3);

    gpio.configure(&mut pin, PinMode::Input, PinPull::PullDown, false)
        .unwrap();
    gpio.arm_interrupt(&mut pin, IrqMode::RisingEdge, IrqPriority::Medium, &handler)
        .unwrap();
    gpio.disarm_interrupt(&mut pin).unwrap();
    gpio.disarm_interrupt(&mut pin).unwrap();

    assert!(!drive(&mut gpio, 3, true));
    assert!(!drive(&mut gpio, 3, false));

    gpio.arm_interrupt(&mut pin, IrqMode::RisingEdge, IrqPriority::Medium, &handler)
        .unwrap();
    assert_eq!(pin.state(), PinState::InterruptArmed);
    assert!(drive(&mut gpio, 3, true));
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn read_on_output_is_rejected() {
    let handlers = HandlerTable::new();
    let mut gpio = Gpio::new(MockGpio::new(), &handlers);
    let mut led = GpioPin::new(17);

    gpio.configure(&mut led, PinMode::Output, PinPull::None, true)
        .unwrap();
    assert_eq!(
        gpio.read(&led),
        Err(PlatformError::Gpio(GpioError::InvalidMode))
    );
    assert!(gpio.hw().level(17));
}

#[test]
fn deinit_silences_pin() {
    let count = AtomicU32::new(0);
    let handler = || {
        count.fetch_add(1, Ordering::SeqCst);
    };
    let handlers = HandlerTable::new();
    let mut gpio = Gpio::new(MockGpio::new(), &handlers);
    let mut pin = GpioPin::new(9);

    gpio.configure(&mut pin, PinMode::Input, PinPull::None, false)
        .unwrap();
    gpio.arm_interrupt(&mut pin, IrqMode::BothEdges, IrqPriority::Medium, &handler)
        .unwrap();
    gpio.deinit(&mut pin).unwrap();

    assert!(!drive(&mut gpio, 9, true));
    assert!(!handlers.dispatch(9, node_timekeeper::platform::traits::Polarity::Toggle));
    assert_eq!(count.load(Ordering::SeqCst), 0);
}
