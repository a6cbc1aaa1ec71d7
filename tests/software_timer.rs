//! Software timers on the mock tick service

use std::sync::atomic::{AtomicU32, Ordering};

use node_timekeeper::config::{RtcConfig, TimerConfig};
use node_timekeeper::platform::mock::{MockCounter, MockTickService};
use node_timekeeper::platform::traits::TickServiceInterface;
use node_timekeeper::platform::{PlatformError, TimerError};
use node_timekeeper::subsystems::rtc::Rtc;
use node_timekeeper::subsystems::timer::{
    current_time, elapsed_since, SoftwareTimer, TimerState,
};

#[test]
fn independent_timers_expire_in_order() {
    let short = AtomicU32::new(0);
    let long = AtomicU32::new(0);
    let on_short = || {
        short.fetch_add(1, Ordering::SeqCst);
    };
    let on_long = || {
        long.fetch_add(1, Ordering::SeqCst);
    };
    let mut service = MockTickService::new();

    let mut a = SoftwareTimer::create(&mut service, &on_short).unwrap();
    let mut b = SoftwareTimer::create(&mut service, &on_long).unwrap();
    a.set_timeout(100);
    b.set_timeout(1_000);
    a.start(&mut service).unwrap();
    b.start(&mut service).unwrap();

    service.advance(3_277);
    assert_eq!(short.load(Ordering::SeqCst), 1);
    assert_eq!(long.load(Ordering::SeqCst), 0);
    assert_eq!(a.state(&service), TimerState::Idle);
    assert_eq!(b.state(&service), TimerState::Armed);

    service.advance(32_768 - 3_277);
    assert_eq!(long.load(Ordering::SeqCst), 1);
}

#[test]
fn restart_extends_deadline() {
    let fired = AtomicU32::new(0);
    let handler = || {
        fired.fetch_add(1, Ordering::SeqCst);
    };
    let mut service = MockTickService::new();
    let mut timer = SoftwareTimer::create(&mut service, &handler).unwrap();
    timer.set_timeout(10);

    timer.start(&mut service).unwrap();
    service.advance(300);
    timer.start(&mut service).unwrap();
    service.advance(300);
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    service.advance(28);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn pool_exhaustion_is_reported() {
    let handler = || {};
    let mut service: MockTickService<'_, 1> = MockTickService::with_pool();

    let _first = SoftwareTimer::create(&mut service, &handler).unwrap();
    assert_eq!(
        SoftwareTimer::create(&mut service, &handler),
        Err(PlatformError::Timer(TimerError::PoolExhausted))
    );
}

#[test]
fn configured_floor_applies() {
    let handler = || {};
    let mut service = MockTickService::new();
    let mut timer = SoftwareTimer::with_config(TimerConfig { min_timeout_ms: 50 });
    timer.init(&mut service, &handler).unwrap();

    assert_eq!(timer.set_timeout(20), 50);
    timer.start(&mut service).unwrap();
    assert_eq!(service.last_start().map(|(_, ticks)| ticks), Some(1_638));
    assert!(service.min_timeout_ticks() <= 1_638);
}

#[test]
fn time_queries_follow_the_rtc() {
    let mut rtc = Rtc::new(MockCounter::new(), RtcConfig::new(8));
    rtc.init(None).unwrap();

    let saved = current_time(&rtc);
    rtc.counter().advance(8 * 42, |event| rtc.on_event(event));
    assert_eq!(current_time(&rtc), saved + 42);
    assert_eq!(elapsed_since(&rtc, saved), 42);
    assert_eq!(elapsed_since(&rtc, saved + 100), 0);
}
