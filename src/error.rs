//! Unified error types for the Retina firmware.
//!
//! Steady-state operation has no failure path: guards are total predicates
//! and a fire with no matching row is a normal idle cycle.  Errors only
//! surface while constructing machines (unknown hardware identity, empty
//! transition table) or validating configuration.  All variants are `Copy`
//! so they can be returned from `no_std`-style code without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A machine or port could not be constructed.
    Init(InitError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Construction errors
// ---------------------------------------------------------------------------

/// Reasons a machine or hardware registry refused to come up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// The button identity is not present in the port's registry.
    UnknownButton(u32),
    /// The transmitter identity is not present in the port's registry.
    UnknownTransmitter(u8),
    /// A machine was built from a table with no rows.
    EmptyTable(&'static str),
    /// A fixed-capacity hardware registry has no free slot.
    RegistryFull,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownButton(id) => write!(f, "unknown button id {id}"),
            Self::UnknownTransmitter(id) => write!(f, "unknown transmitter id {id}"),
            Self::EmptyTable(name) => write!(f, "{name}: empty transition table"),
            Self::RegistryFull => write!(f, "hardware registry full"),
        }
    }
}

impl From<InitError> for Error {
    fn from(e: InitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
