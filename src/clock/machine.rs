//! The alarm clock's states and their behaviors.

use super::board::Board;
use super::config::ClockConfig;
use super::device::{Device, Watchers};
use super::error::ClockError;
use crate::builder::StateMachineBuilder;
use crate::core::{BehaviorResult, Command, State, StateId};
use crate::driver::{StateMachine, Step};
use crate::hal::Rgb;
use crate::menu::{Menu, MenuItem};
use tracing::info;

/// Context shared by every clock behavior.
pub struct ClockContext {
    device: Device,
    watchers: Watchers,
}

impl ClockContext {
    pub fn device(&self) -> &Device {
        &self.device
    }
}

/// Ids of the clock's states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockStates {
    /// Shows the time and runs the alarm.
    pub idle: StateId,
    pub menu: StateId,
    pub set_time: StateId,
    pub set_alarm: StateId,
    pub volume: StateId,
    /// Shown while the alarm key is held after arming.
    pub show_alarm: StateId,
}

/// Which time register an editor state writes back to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Register {
    Time,
    Alarm,
}

/// A bedside alarm clock: two screens, four keys, an LED strip, a light
/// sensor and an audio player.
///
/// Idle shows the time and adapts brightness to the room. Enter opens a
/// menu for setting the alarm, the time and the volume; the alarm key arms
/// and disarms the alarm. An armed alarm plays and pulses the front LED when
/// the time reaches it, until it is switched off or runs out.
///
/// # Example
///
/// ```rust
/// use tickstate::clock::{AlarmClock, ClockConfig};
/// use tickstate::sim::SimBoard;
///
/// let sim = SimBoard::new();
/// let mut clock = AlarmClock::new(sim.board(), ClockConfig::default()).unwrap();
/// clock.start().unwrap();
///
/// sim.key_enter.press();
/// clock.tick().unwrap();
/// assert_eq!(clock.current(), clock.states().menu);
/// ```
pub struct AlarmClock {
    machine: StateMachine<ClockContext>,
    ctx: ClockContext,
    states: ClockStates,
}

impl AlarmClock {
    /// Wire the clock's states onto `board`.
    pub fn new(board: Board, config: ClockConfig) -> Result<Self, ClockError> {
        config.validate()?;

        let mut builder = StateMachine::<ClockContext>::builder();
        let states = ClockStates {
            idle: builder.add_state(State::new("idle")),
            menu: builder.add_state(State::new("menu")),
            set_time: builder.add_state(State::new("set_time")),
            set_alarm: builder.add_state(State::new("set_alarm")),
            volume: builder.add_state(State::new("volume")),
            show_alarm: builder.add_state(State::new("show_alarm")),
        };

        let menu = Menu::new(MenuItem::new("Alarm", states.set_alarm))
            .with(MenuItem::new("Time", states.set_time))
            .with(MenuItem::new("Volume", states.volume))
            .with(MenuItem::new("Exit", states.idle));

        let history_capacity = config.history_capacity;
        let device = Device::new(board, config, menu);
        let watchers = Watchers::new(&device);
        let ctx = ClockContext { device, watchers };

        bind(&mut builder, states)?;
        let machine = builder
            .initial(states.idle)
            .history_capacity(history_capacity)
            .build()?;

        Ok(Self {
            machine,
            ctx,
            states,
        })
    }

    /// Switch every LED off and enter the idle state.
    pub fn start(&mut self) -> Result<(), ClockError> {
        if !self.machine.is_started() {
            self.ctx.device.clear_pixels()?;
        }
        self.machine.start(&mut self.ctx)?;
        Ok(())
    }

    /// One iteration of the main loop.
    pub fn tick(&mut self) -> Result<Step, ClockError> {
        Ok(self.machine.run(&mut self.ctx)?)
    }

    /// Run `iterations` loop iterations, returning how many transitions happened.
    pub fn run_for(&mut self, iterations: usize) -> Result<usize, ClockError> {
        Ok(self.machine.run_for(&mut self.ctx, iterations)?)
    }

    pub fn states(&self) -> ClockStates {
        self.states
    }

    pub fn current(&self) -> StateId {
        self.machine.current()
    }

    pub fn current_name(&self) -> &str {
        self.machine.current_name()
    }

    pub fn device(&self) -> &Device {
        &self.ctx.device
    }

    pub fn machine(&self) -> &StateMachine<ClockContext> {
        &self.machine
    }
}

impl std::fmt::Debug for AlarmClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlarmClock")
            .field("current", &self.machine.current_name())
            .field("states", &self.states)
            .finish_non_exhaustive()
    }
}

fn state(
    builder: &mut StateMachineBuilder<ClockContext>,
    id: StateId,
) -> Result<&mut State<ClockContext>, ClockError> {
    builder.state_mut(id).ok_or(ClockError::MissingState(id))
}

fn bind(
    builder: &mut StateMachineBuilder<ClockContext>,
    states: ClockStates,
) -> Result<(), ClockError> {
    let idle = state(builder, states.idle)?;
    idle.set_on_enter(idle_enter);
    idle.set_on_run(move |ctx: &mut ClockContext| idle_run(ctx, &states));

    let menu = state(builder, states.menu)?;
    menu.set_on_enter(menu_enter);
    menu.set_on_run(move |ctx: &mut ClockContext| menu_run(ctx, &states));

    let set_time = state(builder, states.set_time)?;
    set_time.set_on_enter(|ctx: &mut ClockContext| edit_enter(ctx, Register::Time));
    set_time.set_on_run(move |ctx: &mut ClockContext| {
        edit_run(ctx, Register::Time, states.idle)
    });

    let set_alarm = state(builder, states.set_alarm)?;
    set_alarm.set_on_enter(|ctx: &mut ClockContext| edit_enter(ctx, Register::Alarm));
    set_alarm.set_on_run(move |ctx: &mut ClockContext| {
        edit_run(ctx, Register::Alarm, states.idle)
    });

    let volume = state(builder, states.volume)?;
    volume.set_on_enter(volume_enter);
    volume.set_on_run(move |ctx: &mut ClockContext| volume_run(ctx, states.idle));
    volume.set_on_exit(|ctx: &mut ClockContext| {
        ctx.device.board.player.pause()?;
        Ok(())
    });

    let show_alarm = state(builder, states.show_alarm)?;
    show_alarm.set_on_enter(|ctx: &mut ClockContext| {
        let alarm = ctx.device.board.rtc.alarm()?;
        ctx.device.show_time(alarm)?;
        Ok(())
    });
    show_alarm.set_on_run(move |ctx: &mut ClockContext| show_alarm_run(ctx, states.idle));

    Ok(())
}

fn idle_enter(ctx: &mut ClockContext) -> BehaviorResult {
    let ClockContext { device, watchers } = ctx;
    device.set_backlight(Rgb::OFF)?;
    watchers.time.action(device)
}

fn idle_run(ctx: &mut ClockContext, states: &ClockStates) -> BehaviorResult<Command> {
    let ClockContext { device, watchers } = ctx;
    watchers.evaluate(device)?;

    if device.board.key_enter.pressed() {
        return Ok(Command::change_to(states.menu));
    }

    let mut switch_off = false;
    if device.board.key_alarm.pressed() {
        device.alarm_on = !device.alarm_on;
        if device.alarm_on {
            info!("alarm armed");
            return Ok(Command::change_to(states.show_alarm));
        }
        switch_off = true;
    }

    if device.alarm_playing
        && (switch_off
            || device.board.alarm_off_timer.elapsed_ms() > device.config.alarm_duration_ms)
    {
        device.stop_alarm()?;
        // the strip brightness was left alone while the pulse ran
        watchers.brightness.evaluate_forced(device, true)?;
    }

    if device.alarm_playing
        && device.board.blink_timer.elapsed_ms() >= device.config.blink_interval_ms
    {
        device.pulse()?;
    }

    Ok(Command::nothing())
}

fn menu_enter(ctx: &mut ClockContext) -> BehaviorResult {
    let device = &mut ctx.device;
    device.set_backlight(Rgb::WHITE)?;
    device.board.timer.start();

    device.menu.reset();
    device.draw_menu()?;
    device.board.right.clear()?;
    device.board.right.update()?;
    Ok(())
}

fn menu_run(ctx: &mut ClockContext, states: &ClockStates) -> BehaviorResult<Command> {
    let device = &mut ctx.device;

    if device.board.key_enter.pressed() {
        return Ok(match device.menu.selected_target() {
            Some(target) => Command::change_to(target),
            None => Command::nothing(),
        });
    } else if device.board.key_minus.pressed() {
        device.board.timer.start();
        device.menu.up();
        device.draw_menu()?;
    } else if device.board.key_plus.pressed() {
        device.board.timer.start();
        device.menu.down();
        device.draw_menu()?;
    }

    if device.timed_out() {
        Ok(Command::change_to(states.idle))
    } else {
        Ok(Command::nothing())
    }
}

fn edit_enter(ctx: &mut ClockContext, register: Register) -> BehaviorResult {
    let device = &mut ctx.device;
    device.board.pixels.update()?;
    device.board.timer.start();

    let time = match register {
        Register::Time => device.board.rtc.now()?,
        Register::Alarm => device.board.rtc.alarm()?,
    };
    device
        .time_set
        .init(time, device.board.right.as_mut(), &device.font)?;
    Ok(())
}

fn edit_run(ctx: &mut ClockContext, register: Register, idle: StateId) -> BehaviorResult<Command> {
    let device = &mut ctx.device;
    let status = device.run_editor()?;

    if !status.editing {
        let time = device.time_set.time();
        match register {
            Register::Time => device.board.rtc.set_time(time)?,
            Register::Alarm => device.board.rtc.set_alarm(time)?,
        }
        info!(?register, %time, "time register written");
        return Ok(Command::change_to(idle));
    }

    if status.touched {
        device.board.timer.start();
    }

    if device.timed_out() {
        Ok(Command::change_to(idle))
    } else {
        Ok(Command::nothing())
    }
}

fn volume_enter(ctx: &mut ClockContext) -> BehaviorResult {
    let device = &mut ctx.device;
    device.show_pair("-", "+")?;
    device.board.player.play()?;
    device.board.timer.start();
    Ok(())
}

fn volume_run(ctx: &mut ClockContext, idle: StateId) -> BehaviorResult<Command> {
    let ClockContext { device, watchers } = ctx;
    watchers.alarm.evaluate(device)?;

    if device.timed_out() || device.board.key_enter.pressed() {
        return Ok(Command::change_to(idle));
    }

    if device.board.key_minus.pressed() {
        device.board.player.adjust_volume(-1)?;
        device.board.timer.start();
    } else if device.board.key_plus.pressed() {
        device.board.player.adjust_volume(1)?;
        device.board.timer.start();
    }
    Ok(Command::nothing())
}

fn show_alarm_run(ctx: &mut ClockContext, idle: StateId) -> BehaviorResult<Command> {
    let ClockContext { device, watchers } = ctx;
    watchers.alarm.evaluate(device)?;

    if device.board.key_alarm.is_pressed() {
        Ok(Command::nothing())
    } else {
        Ok(Command::change_to(idle))
    }
}
