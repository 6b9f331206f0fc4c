// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/complex_event.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type of complex event (CURRENT, EXPIRED, TIMER, RESET).
///
/// Only `Current` and `Expired` events carry data a selector projects; `Timer`
/// and `Reset` are control events emitted by upstream windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexEventType {
    #[default]
    Current,
    Expired,
    Timer,
    Reset,
}

impl ComplexEventType {
    /// Whether events of this type are eligible for selection.
    pub fn is_selectable(&self) -> bool {
        matches!(self, ComplexEventType::Current | ComplexEventType::Expired)
    }
}

impl FromStr for ComplexEventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "current" => Ok(ComplexEventType::Current),
            "expired" => Ok(ComplexEventType::Expired),
            "timer" => Ok(ComplexEventType::Timer),
            "reset" => Ok(ComplexEventType::Reset),
            _ => Err(format!(
                "Invalid event type '{s}'. Valid values: 'current', 'expired', 'timer', 'reset'"
            )),
        }
    }
}

impl fmt::Display for ComplexEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComplexEventType::Current => "CURRENT",
            ComplexEventType::Expired => "EXPIRED",
            ComplexEventType::Timer => "TIMER",
            ComplexEventType::Reset => "RESET",
        };
        f.write_str(name)
    }
}
