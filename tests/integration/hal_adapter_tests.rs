//! `RetinaService` wired through the real `embedded-hal` adapters.
//!
//! Pins, PWM and the symbol timer are bench fakes sharing one trace, so
//! this covers `HalButtons`, `HalTransmitters` and `HardwareAdapter`
//! together with the service.

use retina::adapters::hal::{HalButtons, HalTransmitters};
use retina::adapters::hardware::HardwareAdapter;
use retina::app::service::RetinaService;
use retina::config::{LIL_GREEN_BUTTON, LIL_RED_BUTTON, RetinaConfig};
use retina::error::{Error, InitError};

use crate::mock_hw::{
    Bench, BenchClock, BenchPin, BenchPwm, BenchTimer, RecordingSink, Trace, bench, bench_frames, decode_frame,
};

type Buttons = HalButtons<BenchPin, BenchClock, 1>;
type Transmitters = HalTransmitters<BenchPwm, BenchTimer, 1>;
type Board = HardwareAdapter<Buttons, Transmitters>;

fn board(bench: &Bench) -> Board {
    let mut buttons = Buttons::new(BenchClock(bench.clone()));
    buttons.register(0, BenchPin(bench.clone()), true).unwrap();
    let mut txs = Transmitters::new(BenchTimer(bench.clone()));
    txs.register(0, BenchPwm(bench.clone())).unwrap();
    HardwareAdapter::new(buttons, txs)
}

fn pass(svc: &mut RetinaService<Board>, hw: &mut Board, sink: &mut RecordingSink, bench: &Bench, now: u32, down: bool) {
    {
        let mut s = bench.borrow_mut();
        s.now_ms = now;
        s.button_down = down;
    }
    svc.fire_all(hw, sink);
}

#[test]
fn presses_reach_the_carrier_as_nec_frames() {
    let bench = bench();
    let mut hw = board(&bench);
    let mut sink = RecordingSink::default();
    let mut svc = RetinaService::new(&RetinaConfig::default(), &mut hw).unwrap();

    // Carrier forced off at bring-up, before any frame.
    assert_eq!(bench.borrow().trace.first(), Some(&(Trace::CarrierOff, 0)));

    for at in [1_000u32, 2_000] {
        for (now, down) in [(at, true), (at + 151, true), (at + 300, false), (at + 451, false)] {
            pass(&mut svc, &mut hw, &mut sink, &bench, now, down);
        }
    }

    let frames = bench_frames(&bench);
    assert_eq!(frames.len(), 2);
    let codes: Vec<Option<u32>> = frames.iter().map(|f| decode_frame(f)).collect();
    assert_eq!(codes, [Some(LIL_RED_BUTTON), Some(LIL_GREEN_BUTTON)]);
    assert_eq!(sink.sent(), [LIL_RED_BUTTON, LIL_GREEN_BUTTON]);

    // Each frame ends with the carrier off and the timer stopped.
    let state = bench.borrow();
    let trace = &state.trace;
    assert_eq!(trace.last().map(|t| t.0), Some(Trace::TimerStop));
    assert_eq!(trace.iter().rev().nth(1).map(|t| t.0), Some(Trace::CarrierOff));
}

#[test]
fn released_button_sends_nothing() {
    let bench = bench();
    let mut hw = board(&bench);
    let mut sink = RecordingSink::default();
    let mut svc = RetinaService::new(&RetinaConfig::default(), &mut hw).unwrap();

    for now in (0..2_000).step_by(50) {
        pass(&mut svc, &mut hw, &mut sink, &bench, now, false);
    }
    assert!(bench_frames(&bench).is_empty());
    assert!(svc.is_idle());
}

#[test]
fn unregistered_ids_fail_bring_up() {
    let bench = bench();
    let mut hw = board(&bench);
    let config = RetinaConfig {
        button_id: 9,
        ..RetinaConfig::default()
    };
    assert!(matches!(
        RetinaService::new(&config, &mut hw),
        Err(Error::Init(InitError::UnknownButton(9)))
    ));

    let config = RetinaConfig {
        tx_id: 2,
        ..RetinaConfig::default()
    };
    assert!(matches!(
        RetinaService::new(&config, &mut hw),
        Err(Error::Init(InitError::UnknownTransmitter(2)))
    ));
}
