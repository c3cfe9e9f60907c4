//! Enumerated configuration values parsed case-insensitively from text.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Supported logging output formats.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Structured JSON suitable for ingestion by logging stacks.
    #[default]
    Json,
    /// Human-readable single line output.
    Compact,
}

/// How many sessions the server handles before exiting.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AcceptPolicy {
    /// Serve exactly one session, then shut down.
    #[default]
    Single,
    /// Keep accepting sessions one after another until signalled.
    Persistent,
}

impl AcceptPolicy {
    /// Returns `true` when the server stops after the first session.
    #[must_use]
    pub const fn stops_after_first_session(self) -> bool {
        matches!(self, Self::Single)
    }
}

/// Simulation backend driven by the dispatcher.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Hash, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BackendKind {
    /// Built-in backend that records commands through the log.
    #[default]
    Log,
    /// Native esmini library bound through FFI.
    Esmini,
}

/// Errors encountered while parsing one of the enumerated options.
pub type OptionParseError = strum::ParseError;
