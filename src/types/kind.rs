// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Functionality kind (sensor or actuator).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// The two kinds of functionality a device can carry.
///
/// The kind decides which backend collection a new record is posted to,
/// which type catalog is queried, and how the draft's keys are named.
///
/// # Examples
///
/// ```
/// use smarthome_client::types::FunctionalityKind;
///
/// let kind = FunctionalityKind::Actuator;
/// assert_eq!(kind.collection_path(), "/actuators");
/// assert_eq!(kind.name_field(), "actuatorName");
/// assert_eq!(kind.type_field(), "actuatorTypeID");
///
/// let parsed: FunctionalityKind = "sensor".parse().unwrap();
/// assert_eq!(parsed, FunctionalityKind::Sensor);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionalityKind {
    /// A sensor reading some quantity.
    Sensor,
    /// An actuator acting on the environment.
    Actuator,
}

impl FunctionalityKind {
    /// Returns the lowercase kind name used as a key prefix.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sensor => "sensor",
            Self::Actuator => "actuator",
        }
    }

    /// Returns the human-readable label ("Sensor" or "Actuator").
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sensor => "Sensor",
            Self::Actuator => "Actuator",
        }
    }

    /// Returns the pluralized resource path new records are posted to.
    #[must_use]
    pub const fn collection_path(&self) -> &'static str {
        match self {
            Self::Sensor => "/sensors",
            Self::Actuator => "/actuators",
        }
    }

    /// Returns the resource path of the type catalog for this kind.
    #[must_use]
    pub const fn catalog_path(&self) -> &'static str {
        match self {
            Self::Sensor => "/sensortypes",
            Self::Actuator => "/actuatortypes",
        }
    }

    /// Returns the key under `_embedded` holding the type catalog entries.
    #[must_use]
    pub const fn catalog_list_key(&self) -> &'static str {
        match self {
            Self::Sensor => "sensorTypeDTOList",
            Self::Actuator => "actuatorTypeDTOList",
        }
    }

    /// Returns the key under `_embedded` holding listed records of this kind.
    #[must_use]
    pub const fn record_list_key(&self) -> &'static str {
        match self {
            Self::Sensor => "sensorDTOList",
            Self::Actuator => "actuatorDTOList",
        }
    }

    /// Returns the draft key holding the functionality name.
    #[must_use]
    pub const fn name_field(&self) -> &'static str {
        match self {
            Self::Sensor => "sensorName",
            Self::Actuator => "actuatorName",
        }
    }

    /// Returns the draft key holding the selected type identifier.
    #[must_use]
    pub const fn type_field(&self) -> &'static str {
        match self {
            Self::Sensor => "sensorTypeID",
            Self::Actuator => "actuatorTypeID",
        }
    }
}

impl fmt::Display for FunctionalityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FunctionalityKind {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sensor" => Ok(Self::Sensor),
            "actuator" => Ok(Self::Actuator),
            _ => Err(ValueError::InvalidKind(s.to_string())),
        }
    }
}
