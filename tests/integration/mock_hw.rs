//! Mock hardware for integration tests.
//!
//! [`MockHardware`] implements both ports directly and records every
//! carrier segment of every frame, so tests can decode what went out on
//! the wire.  The `Bench*` types are `embedded-hal` fakes sharing one
//! trace, used to drive the real `hal` adapters end to end.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use retina::app::events::AppEvent;
use retina::app::ports::{ButtonPort, Clock, EventSink, SymbolTimer, TxPort};
use retina::error::{InitError, Result};
use retina::nec::{Burst, NEC_FRAME_BURSTS};

// ── Frame decoding ────────────────────────────────────────────

/// One carrier level held for `ticks` symbol ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub on: bool,
    pub ticks: u32,
}

/// Pair alternating ON/OFF segments into bursts.
pub fn to_bursts(segments: &[Segment]) -> Vec<Burst> {
    segments
        .chunks(2)
        .filter(|p| p.len() == 2 && p[0].on && !p[1].on)
        .map(|p| Burst::new(p[0].ticks, p[1].ticks))
        .collect()
}

/// Recover the 32-bit code from a burst sequence.  Bits are told apart by
/// OFF length, so a constant per-phase measurement offset is tolerated.
pub fn decode_frame(bursts: &[Burst]) -> Option<u32> {
    if bursts.len() != NEC_FRAME_BURSTS {
        return None;
    }
    let (prologue, rest) = bursts.split_first()?;
    let (epilogue, bits) = rest.split_last()?;
    if prologue.on_ticks < 160 || prologue.off_ticks < 80 || epilogue.off_ticks < 3560 {
        return None;
    }
    Some(
        bits.iter()
            .fold(0u32, |acc, b| (acc << 1) | u32::from(b.off_ticks >= 20)),
    )
}

// ── Direct port mock ──────────────────────────────────────────

struct OpenSegment {
    on: bool,
    first: Option<u32>,
    last: u32,
}

/// Button and transmitter behind one object, with a hand-driven clock and
/// a symbol counter that advances one tick per read.
pub struct MockHardware {
    pub pressed: bool,
    pub now_ms: u32,
    pub buttons: Vec<u32>,
    pub transmitters: Vec<u8>,
    pub carrier_on: bool,
    pub timer_running: bool,
    ticks: u32,
    frames: Vec<Vec<OpenSegment>>,
}

impl MockHardware {
    pub fn new() -> Self {
        Self {
            pressed: false,
            now_ms: 0,
            buttons: vec![0],
            transmitters: vec![0],
            carrier_on: false,
            timer_running: false,
            ticks: 0,
            frames: Vec::new(),
        }
    }

    /// Set the clock and raw button level for the next pass.
    pub fn at(&mut self, now_ms: u32, pressed: bool) -> &mut Self {
        self.now_ms = now_ms;
        self.pressed = pressed;
        self
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_segments(&self) -> Vec<Vec<Segment>> {
        self.frames
            .iter()
            .map(|f| {
                f.iter()
                    .map(|s| Segment {
                        on: s.on,
                        ticks: s.last - s.first.unwrap_or(s.last),
                    })
                    .collect()
            })
            .collect()
    }

    pub fn frame_bursts(&self) -> Vec<Vec<Burst>> {
        self.frame_segments().iter().map(|f| to_bursts(f)).collect()
    }

    /// Codes decoded from every frame sent so far.
    pub fn sent_codes(&self) -> Vec<u32> {
        self.frame_bursts()
            .iter()
            .filter_map(|b| decode_frame(b))
            .collect()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonPort for MockHardware {
    fn init(&mut self, button_id: u32) -> Result<()> {
        if self.buttons.contains(&button_id) {
            Ok(())
        } else {
            Err(InitError::UnknownButton(button_id).into())
        }
    }

    fn is_pressed(&mut self, _button_id: u32) -> bool {
        self.pressed
    }

    fn tick(&self) -> u32 {
        self.now_ms
    }
}

impl TxPort for MockHardware {
    fn init(&mut self, tx_id: u8, carrier_on: bool) -> Result<()> {
        if !self.transmitters.contains(&tx_id) {
            return Err(InitError::UnknownTransmitter(tx_id).into());
        }
        self.carrier_on = carrier_on;
        Ok(())
    }

    fn carrier_set(&mut self, _tx_id: u8, on: bool) {
        self.carrier_on = on;
        if let Some(frame) = self.frames.last_mut() {
            frame.push(OpenSegment {
                on,
                first: None,
                last: 0,
            });
        }
    }

    fn symbol_timer_start(&mut self) {
        self.timer_running = true;
        self.ticks = 0;
        self.frames.push(Vec::new());
    }

    fn symbol_timer_stop(&mut self) {
        self.timer_running = false;
    }

    fn symbol_timer_ticks(&mut self) -> u32 {
        let t = self.ticks;
        self.ticks = self.ticks.wrapping_add(1);
        if let Some(seg) = self.frames.last_mut().and_then(|f| f.last_mut()) {
            seg.first.get_or_insert(t);
            seg.last = t;
        }
        t
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn queued(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::CodeQueued { code, .. } => Some(*code),
                _ => None,
            })
            .collect()
    }

    pub fn sent(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::FrameSent { code, .. } => Some(*code),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── embedded-hal bench ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trace {
    CarrierOn,
    CarrierOff,
    TimerStart,
    TimerStop,
}

/// Shared state behind the bench fakes.
#[derive(Default)]
pub struct BenchState {
    /// Active-low button held down.
    pub button_down: bool,
    pub now_ms: u32,
    ticks: u32,
    pub trace: Vec<(Trace, u32)>,
}

pub type Bench = Rc<RefCell<BenchState>>;

pub fn bench() -> Bench {
    Rc::new(RefCell::new(BenchState::default()))
}

/// Burst sequences between each timer start and stop.  Every level is
/// measured from one carrier write to the next, so phases read one tick
/// long; [`decode_frame`] tolerates that.
pub fn bench_frames(bench: &Bench) -> Vec<Vec<Burst>> {
    let state = bench.borrow();
    let mut frames = Vec::new();
    let mut current: Option<Vec<(bool, u32)>> = None;
    for &(ev, at) in &state.trace {
        match ev {
            Trace::TimerStart => current = Some(Vec::new()),
            Trace::CarrierOn | Trace::CarrierOff => {
                if let Some(levels) = current.as_mut() {
                    levels.push((ev == Trace::CarrierOn, at));
                }
            }
            Trace::TimerStop => {
                if let Some(levels) = current.take() {
                    let segments: Vec<Segment> = levels
                        .iter()
                        .enumerate()
                        .map(|(i, &(on, start))| {
                            let end = levels.get(i + 1).map_or(at, |&(_, t)| t);
                            Segment {
                                on,
                                ticks: end - start,
                            }
                        })
                        .collect();
                    frames.push(to_bursts(&segments));
                }
            }
        }
    }
    frames
}

/// Active-low GPIO input.
pub struct BenchPin(pub Bench);

impl embedded_hal::digital::ErrorType for BenchPin {
    type Error = Infallible;
}

impl embedded_hal::digital::InputPin for BenchPin {
    fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
        Ok(!self.0.borrow().button_down)
    }

    fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
        Ok(self.0.borrow().button_down)
    }
}

pub struct BenchClock(pub Bench);

impl Clock for BenchClock {
    fn now_ms(&self) -> u32 {
        self.0.borrow().now_ms
    }
}

/// Symbol counter that advances one tick per read.
pub struct BenchTimer(pub Bench);

impl SymbolTimer for BenchTimer {
    fn start(&mut self) {
        let mut s = self.0.borrow_mut();
        s.ticks = 0;
        s.trace.push((Trace::TimerStart, 0));
    }

    fn stop(&mut self) {
        let mut s = self.0.borrow_mut();
        let at = s.ticks;
        s.trace.push((Trace::TimerStop, at));
    }

    fn ticks(&self) -> u32 {
        let mut s = self.0.borrow_mut();
        let t = s.ticks;
        s.ticks += 1;
        t
    }
}

/// PWM channel that stamps every duty change with the symbol counter.
pub struct BenchPwm(pub Bench);

impl embedded_hal::pwm::ErrorType for BenchPwm {
    type Error = Infallible;
}

impl embedded_hal::pwm::SetDutyCycle for BenchPwm {
    fn max_duty_cycle(&self) -> u16 {
        100
    }

    fn set_duty_cycle(&mut self, duty: u16) -> core::result::Result<(), Infallible> {
        let mut s = self.0.borrow_mut();
        let at = s.ticks;
        let ev = if duty > 0 { Trace::CarrierOn } else { Trace::CarrierOff };
        s.trace.push((ev, at));
        Ok(())
    }
}
