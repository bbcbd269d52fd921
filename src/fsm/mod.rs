//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern ported to Rust:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Transition table (ordered, first match wins)                │
//! │  ┌───────────────┬────────────────┬───────────────┬────────┐ │
//! │  │ from          │ guard          │ to            │ action │ │
//! │  ├───────────────┼────────────────┼───────────────┼────────┤ │
//! │  │ Released      │ fn(&M, &Io)    │ PressedWait   │ Some   │ │
//! │  │ PressedWait   │ fn(&M, &Io)    │ Pressed       │ None   │ │
//! │  │ ...           │                │               │        │ │
//! │  └───────────────┴────────────────┴───────────────┴────────┘ │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each [`Fsm::fire`] scans the rows whose `from` equals the current state
//! and evaluates their guards in table order.  The first guard that holds
//! runs its action (which may mutate the machine's private data `M` and use
//! the io context `Io`) and moves the machine to `to`.  At most one
//! transition fires per call; when no guard holds the state is left alone,
//! which is the normal idle cycle rather than an error.
//!
//! Concrete machines live in the submodules and are reached through the
//! [`StateMachine`] and [`Fire`] capabilities.

pub mod button;
pub mod retina;
pub mod tx;

use core::fmt::Debug;

use log::debug;

use crate::error::{InitError, Result};

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Side-effect-free predicate deciding whether a row may fire.
pub type GuardFn<M, Io> = fn(&M, &Io) -> bool;

/// Output run when a row fires.  May mutate the machine's private data and
/// drive the io context.
pub type ActionFn<M, Io> = fn(&mut M, &mut Io);

// ---------------------------------------------------------------------------
// Transition (one row in the table)
// ---------------------------------------------------------------------------

/// Static description of one guarded transition.
/// Stored in `&'static` slices: no heap, no `dyn`.
pub struct Transition<S, M, Io> {
    pub from: S,
    pub guard: GuardFn<M, Io>,
    pub to: S,
    pub action: Option<ActionFn<M, Io>>,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// Current state plus the table that drives it.
pub struct Fsm<S: 'static, M: 'static, Io: 'static> {
    name: &'static str,
    table: &'static [Transition<S, M, Io>],
    state: S,
}

impl<S, M, Io> Fsm<S, M, Io>
where
    S: Copy + PartialEq + Debug + 'static,
    M: 'static,
    Io: 'static,
{
    /// Bind `table` and start in the first row's source state.
    pub fn new(name: &'static str, table: &'static [Transition<S, M, Io>]) -> Result<Self> {
        let first = table.first().ok_or(InitError::EmptyTable(name))?;
        Ok(Self {
            name,
            table,
            state: first.from,
        })
    }

    /// Evaluate the table once.  Returns `true` if a transition fired
    /// (including self-transitions).
    pub fn fire(&mut self, data: &mut M, io: &mut Io) -> bool {
        let current = self.state;
        let Some(row) = self
            .table
            .iter()
            .find(|t| t.from == current && (t.guard)(data, io))
        else {
            return false;
        };

        if let Some(action) = row.action {
            action(data, io);
        }
        if row.to != current {
            debug!("{}: {:?} -> {:?}", self.name, current, row.to);
        }
        self.state = row.to;
        true
    }

    /// The current state.
    pub fn state(&self) -> S {
        self.state
    }

    /// Machine name used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

// ---------------------------------------------------------------------------
// Machine capabilities
// ---------------------------------------------------------------------------

/// What every concrete machine exposes to its driver.
pub trait StateMachine {
    type State: Copy + PartialEq + Debug;

    fn state(&self) -> Self::State;

    /// `true` while the machine is in the middle of something and the
    /// driver should keep polling it at full rate.
    fn check_activity(&self) -> bool;
}

/// Run one engine step against the io context `Io`.
pub trait Fire<Io: ?Sized>: StateMachine {
    fn fire(&mut self, io: &mut Io) -> bool;
}
