//! End-to-end tests for `RetinaService` against `MockHardware`.
//!
//! Every test drives the loop pass by pass with an explicit clock and
//! button level, then decodes the carrier trace to check what was sent.

use retina::app::events::AppEvent;
use retina::app::service::RetinaService;
use retina::config::{LIL_BLUE_BUTTON, LIL_GREEN_BUTTON, LIL_RED_BUTTON, RetinaConfig};
use retina::error::{Error, InitError};
use retina::fsm::StateMachine;
use retina::fsm::button::ButtonState;
use retina::nec::{self, Burst};

use crate::mock_hw::{MockHardware, RecordingSink};

struct Rig {
    hw: MockHardware,
    sink: RecordingSink,
    svc: RetinaService<MockHardware>,
}

impl Rig {
    fn new() -> Self {
        Self::with_config(&RetinaConfig::default())
    }

    fn with_config(config: &RetinaConfig) -> Self {
        let mut hw = MockHardware::new();
        let mut sink = RecordingSink::default();
        let svc = RetinaService::new(config, &mut hw).unwrap();
        svc.start(&mut sink);
        Self { hw, sink, svc }
    }

    fn pass(&mut self, now_ms: u32, pressed: bool) {
        self.hw.at(now_ms, pressed);
        self.svc.fire_all(&mut self.hw, &mut self.sink);
    }

    /// A clean press of `len_ms` starting at `at`, followed by enough
    /// passes to settle and flush any queued frame.
    fn press(&mut self, at: u32, len_ms: u32) {
        self.pass(at, true);
        self.pass(at.wrapping_add(151), true);
        self.pass(at.wrapping_add(len_ms), false);
        self.pass(at.wrapping_add(len_ms).wrapping_add(151), false);
        self.pass(at.wrapping_add(len_ms).wrapping_add(160), false);
    }
}

// ── Construction ──────────────────────────────────────────────

#[test]
fn start_announces_wiring() {
    let rig = Rig::new();
    assert_eq!(rig.sink.events, [AppEvent::Started { button_id: 0, tx_id: 0 }]);
    assert!(rig.svc.is_idle());
    assert!(!rig.hw.carrier_on);
}

#[test]
fn unknown_button_fails_construction() {
    let mut hw = MockHardware::new();
    hw.buttons.clear();
    let res = RetinaService::new(&RetinaConfig::default(), &mut hw);
    assert!(matches!(res, Err(Error::Init(InitError::UnknownButton(0)))));
}

#[test]
fn unknown_transmitter_fails_construction() {
    let mut hw = MockHardware::new();
    let config = RetinaConfig {
        tx_id: 3,
        ..RetinaConfig::default()
    };
    let res = RetinaService::new(&config, &mut hw);
    assert!(matches!(res, Err(Error::Init(InitError::UnknownTransmitter(3)))));
}

#[test]
fn invalid_config_fails_before_touching_hardware() {
    let mut hw = MockHardware::new();
    hw.buttons.clear();
    let config = RetinaConfig {
        long_press_ms: 100,
        ..RetinaConfig::default()
    };
    // The config error wins over the unknown button.
    assert!(matches!(RetinaService::new(&config, &mut hw), Err(Error::Config(_))));
}

// ── Rotation ──────────────────────────────────────────────────

#[test]
fn short_presses_cycle_through_codes() {
    let mut rig = Rig::new();
    for (i, at) in [1_000, 2_000, 3_000, 4_000].into_iter().enumerate() {
        rig.press(at, 300);
        assert_eq!(rig.hw.frame_count(), i + 1);
        assert!(rig.svc.is_idle());
    }

    let expected = [LIL_RED_BUTTON, LIL_GREEN_BUTTON, LIL_BLUE_BUTTON, LIL_RED_BUTTON];
    assert_eq!(rig.hw.sent_codes(), expected);
    assert_eq!(rig.sink.queued(), expected);
    assert_eq!(rig.sink.sent(), expected);
    assert_eq!(rig.svc.retina().index(), 1);
}

#[test]
fn frame_on_the_wire_matches_encoder() {
    let mut rig = Rig::new();
    rig.press(500, 200);

    let bursts = rig.hw.frame_bursts();
    assert_eq!(bursts.len(), 1);
    let expected: Vec<Burst> = nec::frame(LIL_RED_BUTTON).collect();
    assert_eq!(bursts[0], expected);
    assert!(!rig.hw.carrier_on);
    assert!(!rig.hw.timer_running);
}

#[test]
fn code_is_sent_on_the_pass_after_it_is_queued() {
    let mut rig = Rig::new();
    rig.pass(1_000, true);
    rig.pass(1_151, true);
    rig.pass(1_400, false);
    assert_eq!(rig.svc.tx().code(), LIL_RED_BUTTON);
    assert_eq!(rig.hw.frame_count(), 0);

    // Still debouncing the release, but the transmitter does not care.
    rig.pass(1_410, false);
    assert_eq!(rig.svc.button().state(), ButtonState::ReleasedWait);
    assert_eq!(rig.hw.sent_codes(), [LIL_RED_BUTTON]);
    assert_eq!(rig.svc.tx().code(), 0);
}

#[test]
fn custom_codes_are_honoured() {
    let config = RetinaConfig {
        codes: [0x1111_1111, 0x2222_2222, 0x8000_0001],
        ..RetinaConfig::default()
    };
    let mut rig = Rig::with_config(&config);
    rig.press(0, 400);
    rig.press(1_000, 400);
    rig.press(2_000, 400);
    assert_eq!(rig.hw.sent_codes(), config.codes);
}

// ── Debounce and press length ─────────────────────────────────

#[test]
fn bounces_inside_debounce_windows_are_absorbed() {
    let mut rig = Rig::new();
    for (now, level) in [(1_000, true), (1_010, false), (1_020, true), (1_151, true)] {
        rig.pass(now, level);
    }
    assert_eq!(rig.svc.button().state(), ButtonState::Pressed);

    for (now, level) in [(1_500, false), (1_510, true), (1_520, false), (1_651, false), (1_660, false)] {
        rig.pass(now, level);
    }
    assert_eq!(rig.svc.button().state(), ButtonState::Released);
    assert_eq!(rig.hw.sent_codes(), [LIL_RED_BUTTON]);
    assert_eq!(rig.sink.queued().len(), 1);
}

#[test]
fn long_press_is_ignored_and_rotation_holds() {
    let mut rig = Rig::new();
    rig.press(0, 3_000);
    assert_eq!(rig.hw.frame_count(), 0);
    assert_eq!(rig.svc.retina().index(), 0);
    assert!(rig.sink.queued().is_empty());

    // The next short press still starts at the first code.
    rig.press(5_000, 250);
    assert_eq!(rig.hw.sent_codes(), [LIL_RED_BUTTON]);
}

#[test]
fn press_just_under_threshold_is_short() {
    let mut rig = Rig::new();
    rig.press(0, 2_999);
    assert_eq!(rig.hw.sent_codes(), [LIL_RED_BUTTON]);
}

#[test]
fn press_across_clock_wrap_is_measured() {
    let mut rig = Rig::new();
    rig.press(u32::MAX - 100, 400);
    assert_eq!(rig.hw.sent_codes(), [LIL_RED_BUTTON]);
}

#[test]
fn button_transitions_are_reported_in_order() {
    let mut rig = Rig::new();
    rig.press(100, 300);
    let changes: Vec<(ButtonState, ButtonState)> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::ButtonChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        [
            (ButtonState::Released, ButtonState::PressedWait),
            (ButtonState::PressedWait, ButtonState::Pressed),
            (ButtonState::Pressed, ButtonState::ReleasedWait),
            (ButtonState::ReleasedWait, ButtonState::Released),
        ]
    );
    assert_eq!(rig.svc.passes(), 5);
}
