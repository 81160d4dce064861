//! End-to-end tests of the alarm clock on simulated hardware.

use tickstate::clock::{pixel, AlarmClock, ClockConfig, ClockError};
use tickstate::driver::{MachineError, Phase, Step};
use tickstate::hal::{HalError, HourMinute, Rgb};
use tickstate::sim::{SimBoard, SimButton};

fn hm(hour: u8, minute: u8) -> HourMinute {
    HourMinute::new(hour, minute).unwrap()
}

fn started(sim: &SimBoard, config: ClockConfig) -> AlarmClock {
    let mut clock = AlarmClock::new(sim.board(), config).unwrap();
    clock.start().unwrap();
    clock
}

fn press_and_tick(clock: &mut AlarmClock, key: &SimButton) -> Step {
    key.press();
    clock.tick().unwrap()
}

/// Clock armed for 06:30 with the time one minute before.
fn armed(sim: &SimBoard, config: ClockConfig) -> AlarmClock {
    sim.rtc.set_now(hm(6, 29));
    sim.rtc.set_alarm_time(hm(6, 30));
    let mut clock = started(sim, config);

    press_and_tick(&mut clock, &sim.key_alarm);
    clock.tick().unwrap();
    assert_eq!(clock.current(), clock.states().idle);
    assert!(clock.device().alarm_on());
    clock
}

#[test]
fn idle_shows_current_time() {
    let sim = SimBoard::new();
    sim.rtc.set_now(hm(7, 5));
    let mut clock = started(&sim, ClockConfig::default());

    assert_eq!(clock.current_name(), "idle");
    clock.tick().unwrap();

    assert_eq!(sim.left.last_texts(), vec!["07"]);
    assert_eq!(sim.right.last_texts(), vec!["05"]);
    assert_eq!(clock.device().now(), hm(7, 5));
}

#[test]
fn enter_opens_menu() {
    let sim = SimBoard::new();
    let mut clock = started(&sim, ClockConfig::default());
    let states = clock.states();

    let step = press_and_tick(&mut clock, &sim.key_enter);

    assert_eq!(
        step,
        Step::Changed {
            from: states.idle,
            to: states.menu
        }
    );
    assert_eq!(sim.left.last_texts(), vec!["Alarm", "Time", "Volume", "Exit"]);
    assert!(sim.right.last_frame().is_empty());
    assert_eq!(sim.pixels.shown(pixel::LEFT), Some(Rgb::WHITE));
}

#[test]
fn menu_times_out_to_idle() {
    let sim = SimBoard::new();
    let mut clock = started(&sim, ClockConfig::default());
    press_and_tick(&mut clock, &sim.key_enter);

    sim.ticks.advance(10_000);
    assert_eq!(clock.tick().unwrap(), Step::Stayed);

    sim.ticks.advance(1);
    clock.tick().unwrap();
    assert_eq!(clock.current(), clock.states().idle);
    assert_eq!(sim.pixels.shown(pixel::LEFT), Some(Rgb::OFF));
}

#[test]
fn menu_navigation_restarts_timeout() {
    let sim = SimBoard::new();
    let mut clock = started(&sim, ClockConfig::default());
    press_and_tick(&mut clock, &sim.key_enter);

    sim.ticks.advance(9_000);
    press_and_tick(&mut clock, &sim.key_plus);
    sim.ticks.advance(9_000);
    clock.tick().unwrap();

    assert_eq!(clock.current(), clock.states().menu);
    assert_eq!(clock.device().menu().selected().label(), "Time");
}

#[test]
fn set_time_writes_edited_time_after_four_enters() {
    let sim = SimBoard::new();
    sim.rtc.set_now(hm(7, 0));
    let mut clock = started(&sim, ClockConfig::default());
    let states = clock.states();

    press_and_tick(&mut clock, &sim.key_enter);
    press_and_tick(&mut clock, &sim.key_plus);
    press_and_tick(&mut clock, &sim.key_enter);
    assert_eq!(clock.current(), states.set_time);
    assert_eq!(sim.right.last_texts(), vec!["0", "7", ":", "0", "0"]);

    press_and_tick(&mut clock, &sim.key_plus);
    for _ in 0..3 {
        press_and_tick(&mut clock, &sim.key_enter);
        assert_eq!(clock.current(), states.set_time);
    }
    assert_eq!(sim.rtc.time(), hm(7, 0));

    press_and_tick(&mut clock, &sim.key_enter);
    assert_eq!(clock.current(), states.idle);
    assert_eq!(sim.rtc.time(), hm(17, 0));
}

#[test]
fn abandoned_alarm_edit_is_discarded() {
    let sim = SimBoard::new();
    sim.rtc.set_alarm_time(hm(6, 30));
    let mut clock = started(&sim, ClockConfig::default());

    press_and_tick(&mut clock, &sim.key_enter);
    press_and_tick(&mut clock, &sim.key_enter);
    assert_eq!(clock.current(), clock.states().set_alarm);

    press_and_tick(&mut clock, &sim.key_plus);
    assert_eq!(clock.device().time_set().time(), hm(16, 30));

    sim.ticks.advance(10_001);
    clock.tick().unwrap();
    assert_eq!(clock.current(), clock.states().idle);
    assert_eq!(sim.rtc.alarm_time(), hm(6, 30));
}

#[test]
fn volume_screen_adjusts_and_pauses_on_exit() {
    let sim = SimBoard::new();
    let mut clock = started(&sim, ClockConfig::default());

    press_and_tick(&mut clock, &sim.key_enter);
    press_and_tick(&mut clock, &sim.key_plus);
    press_and_tick(&mut clock, &sim.key_plus);
    press_and_tick(&mut clock, &sim.key_enter);
    assert_eq!(clock.current(), clock.states().volume);
    assert!(sim.player.is_playing());
    assert_eq!(sim.left.last_texts(), vec!["-"]);
    assert_eq!(sim.right.last_texts(), vec!["+"]);

    press_and_tick(&mut clock, &sim.key_plus);
    press_and_tick(&mut clock, &sim.key_plus);
    press_and_tick(&mut clock, &sim.key_minus);
    assert_eq!(sim.player.volume(), 1);

    press_and_tick(&mut clock, &sim.key_enter);
    assert_eq!(clock.current(), clock.states().idle);
    assert!(!sim.player.is_playing());
}

#[test]
fn arming_shows_alarm_time_while_key_is_held() {
    let sim = SimBoard::new();
    sim.rtc.set_alarm_time(hm(6, 30));
    let mut clock = started(&sim, ClockConfig::default());

    sim.key_alarm.hold(true);
    press_and_tick(&mut clock, &sim.key_alarm);
    assert_eq!(clock.current(), clock.states().show_alarm);
    assert_eq!(sim.left.last_texts(), vec!["06"]);
    assert_eq!(sim.right.last_texts(), vec!["30"]);

    clock.tick().unwrap();
    assert_eq!(clock.current(), clock.states().show_alarm);
    assert_eq!(sim.pixels.shown(pixel::FRONT), Some(Rgb::new(0, 0, 255)));

    sim.key_alarm.hold(false);
    clock.tick().unwrap();
    assert_eq!(clock.current(), clock.states().idle);
}

#[test]
fn alarm_fires_pulses_and_stops_after_duration() {
    let sim = SimBoard::new();
    let config = ClockConfig {
        alarm_duration_ms: 1_000,
        ..Default::default()
    };
    let mut clock = armed(&sim, config);

    clock.tick().unwrap();
    assert!(!sim.player.is_playing());

    sim.rtc.set_now(hm(6, 30));
    clock.tick().unwrap();
    assert!(sim.player.is_playing());
    assert!(clock.device().alarm_playing());

    sim.ticks.advance(50);
    clock.tick().unwrap();
    assert_eq!(sim.pixels.shown(pixel::FRONT), Some(Rgb::new(0, 0, 0)));
    sim.ticks.advance(50);
    clock.tick().unwrap();
    assert_eq!(sim.pixels.shown(pixel::FRONT), Some(Rgb::new(2, 0, 0)));

    sim.ticks.advance(1_000);
    clock.tick().unwrap();
    assert!(!sim.player.is_playing());
    assert!(!clock.device().alarm_playing());
    assert!(!clock.device().alarm_on());
    assert_eq!(sim.pixels.brightness(), 5);

    // still 06:30, but the alarm does not fire again
    clock.run_for(3).unwrap();
    assert!(!sim.player.is_playing());
    assert_eq!(sim.player.play_count(), 1);
}

#[test]
fn alarm_key_switches_playing_alarm_off() {
    let sim = SimBoard::new();
    let mut clock = armed(&sim, ClockConfig::default());

    sim.rtc.set_now(hm(6, 30));
    clock.tick().unwrap();
    assert!(sim.player.is_playing());

    press_and_tick(&mut clock, &sim.key_alarm);
    assert!(!sim.player.is_playing());
    assert!(!clock.device().alarm_on());
    assert_eq!(clock.current(), clock.states().idle);
}

#[test]
fn disarmed_alarm_stays_silent() {
    let sim = SimBoard::new();
    sim.rtc.set_now(hm(6, 29));
    sim.rtc.set_alarm_time(hm(6, 30));
    let mut clock = started(&sim, ClockConfig::default());

    sim.rtc.set_now(hm(6, 30));
    clock.run_for(2).unwrap();
    assert!(!sim.player.is_playing());
}

#[test]
fn ambient_light_sets_brightness() {
    let sim = SimBoard::new();
    let mut clock = started(&sim, ClockConfig::default());

    sim.light.set(100.0);
    clock.tick().unwrap();

    assert_eq!(clock.device().brightness_index(), 13);
    assert_eq!(sim.pixels.brightness(), 13);
    assert_eq!(sim.left.contrast(), 128);
    assert_eq!(sim.right.contrast(), 128);
}

#[test]
fn time_source_failure_surfaces_from_tick() {
    let sim = SimBoard::new();
    let mut clock = started(&sim, ClockConfig::default());

    sim.rtc.fail_with(Some(HalError::Unavailable("rtc")));
    match clock.tick() {
        Err(ClockError::Machine(MachineError::Behavior { state, phase, .. })) => {
            assert_eq!(state, "idle");
            assert_eq!(phase, Phase::Run);
        }
        other => panic!("Expected behavior error, got {other:?}"),
    }
}

#[test]
fn invalid_config_is_rejected() {
    let sim = SimBoard::new();
    let config = ClockConfig {
        menu_timeout_ms: 0,
        ..Default::default()
    };

    let err = AlarmClock::new(sim.board(), config).unwrap_err();
    assert!(matches!(err, ClockError::Config(_)));
}

#[test]
fn transitions_are_recorded() {
    let sim = SimBoard::new();
    let mut clock = started(&sim, ClockConfig::default());
    let states = clock.states();

    press_and_tick(&mut clock, &sim.key_enter);
    sim.ticks.advance(10_001);
    clock.tick().unwrap();

    assert_eq!(
        clock.machine().history().get_path(),
        vec![states.idle, states.menu, states.idle]
    );
}
