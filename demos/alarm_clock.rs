//! Alarm Clock
//!
//! This example runs the alarm clock on simulated hardware through a
//! scripted morning.
//!
//! Key concepts:
//! - A state machine driven one iteration at a time
//! - Change detectors reacting to time and light
//! - Menu navigation into the time editor
//! - The alarm firing, pulsing and timing out
//!
//! Run with: RUST_LOG=tickstate=debug cargo run --example alarm_clock

use tickstate::clock::{pixel, AlarmClock, ClockConfig};
use tickstate::hal::HourMinute;
use tickstate::sim::SimBoard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let sim = SimBoard::new();
    sim.rtc.set_now(HourMinute::new(6, 58)?);
    sim.rtc.set_alarm_time(HourMinute::new(7, 0)?);
    sim.light.set(3.0);

    let config = ClockConfig::from_json_str(r#"{ "alarm_duration_ms": 2000 }"#)?;
    let mut clock = AlarmClock::new(sim.board(), config)?;
    clock.start()?;
    clock.tick()?;
    println!("Showing {}", sim.left.last_texts().join(""));

    // Set the clock one minute ahead through the menu: Time, then bump the
    // minute ones digit.
    sim.key_enter.press();
    clock.tick()?;
    sim.key_plus.press();
    clock.tick()?;
    println!("Menu selection: {}", clock.device().menu().selected().label());
    sim.key_enter.press();
    clock.tick()?;
    println!("Editing in state '{}'", clock.current_name());

    for _ in 0..3 {
        sim.key_enter.press();
        clock.tick()?;
    }
    sim.key_plus.press();
    clock.tick()?;
    sim.key_enter.press();
    clock.tick()?;
    println!("Clock set to {}", sim.rtc.time());

    // Arm the alarm; releasing the key returns to idle.
    sim.key_alarm.press();
    clock.tick()?;
    clock.tick()?;
    println!("Alarm armed: {}", clock.device().alarm_on());

    sim.rtc.set_now(HourMinute::new(7, 0)?);
    clock.tick()?;
    println!("Alarm playing: {}", sim.player.is_playing());

    for _ in 0..5 {
        sim.ticks.advance(50);
        clock.tick()?;
        println!("Front LED: {:?}", sim.pixels.shown(pixel::FRONT));
    }

    sim.ticks.advance(2000);
    clock.tick()?;
    println!(
        "Alarm playing after timeout: {}, armed: {}",
        sim.player.is_playing(),
        clock.device().alarm_on()
    );

    println!("\nTransitions:");
    for record in clock.machine().history().transitions() {
        let from = clock.machine().state(record.from).map_or("?", |s| s.name());
        let to = clock.machine().state(record.to).map_or("?", |s| s.name());
        println!("  {from} -> {to}");
    }

    Ok(())
}
