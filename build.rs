use std::env;

fn main() {
    // Timing defaults are baked in at build time so the firmware image
    // carries them without a parameter store.

    // RTC tick frequency in Hz (must divide the 32768 Hz LFCLK)
    if let Ok(freq) = env::var("NODE_RTC_FREQUENCY_HZ") {
        println!("cargo:rustc-env=NODE_RTC_FREQUENCY_HZ={}", freq);
        println!(
            "cargo:warning=Using NODE_RTC_FREQUENCY_HZ from environment: {}",
            freq
        );
    } else {
        println!("cargo:rustc-env=NODE_RTC_FREQUENCY_HZ=8");
    }

    // Software timer floor in milliseconds
    if let Ok(floor) = env::var("NODE_TIMER_MIN_TIMEOUT_MS") {
        println!("cargo:rustc-env=NODE_TIMER_MIN_TIMEOUT_MS={}", floor);
        println!(
            "cargo:warning=Using NODE_TIMER_MIN_TIMEOUT_MS from environment: {}",
            floor
        );
    } else {
        println!("cargo:rustc-env=NODE_TIMER_MIN_TIMEOUT_MS=10");
    }

    // Rerun if environment variables change
    println!("cargo:rerun-if-env-changed=NODE_RTC_FREQUENCY_HZ");
    println!("cargo:rerun-if-env-changed=NODE_TIMER_MIN_TIMEOUT_MS");
}
