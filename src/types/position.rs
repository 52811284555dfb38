// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Actuator position type.
//!
//! Roller-blind style actuators report and accept a position between 0 and
//! 100. The slider control only ever produces values in that range, so the
//! type enforces it at construction time.

use std::fmt;

use serde_json::Value;

use crate::error::ValueError;

/// Actuator position in the range 0-100.
///
/// # Examples
///
/// ```
/// use smarthome_client::types::Position;
///
/// let pos = Position::new(42).unwrap();
/// assert_eq!(pos.value(), 42);
///
/// assert_eq!(Position::MIN.value(), 0);
/// assert_eq!(Position::MAX.value(), 100);
///
/// assert!(Position::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(u8);

impl Position {
    /// Fully closed (0).
    pub const MIN: Self = Self(0);

    /// Fully open (100).
    pub const MAX: Self = Self(100);

    /// Position assumed when the backend reports no usable initial status.
    pub const FALLBACK: Self = Self::MAX;

    /// Creates a new position.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a position, clamping any integer to the valid range.
    ///
    /// ```
    /// use smarthome_client::types::Position;
    ///
    /// assert_eq!(Position::clamped(-5).value(), 0);
    /// assert_eq!(Position::clamped(250).value(), 100);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn clamped(value: i64) -> Self {
        // Safe: clamped into 0..=100 before the cast
        Self(value.clamp(0, 100) as u8)
    }

    /// Returns the position value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Extracts an integer from a status value reported by the backend.
    ///
    /// The backend reports status either as a JSON number or as a numeric
    /// string such as `"80"`. Anything else yields `None`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn parse_status(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n
                .as_i64()
                // Truncates like an integer parse of "80.5" would
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Builds the initial position from a listed actuator's status.
    ///
    /// Missing or non-numeric statuses fall back to [`Position::FALLBACK`];
    /// numeric statuses outside 0-100 are clamped.
    #[must_use]
    pub fn from_initial_status(value: Option<&Value>) -> Self {
        value
            .and_then(Self::parse_status)
            .map_or(Self::FALLBACK, Self::clamped)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Position {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
