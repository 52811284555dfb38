// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for backend JSON payloads.
//!
//! The backend wraps collections in HAL envelopes
//! (`{"_embedded": {"actuatorDTOList": [...]}}`) and returns single records
//! as flat JSON objects. This module provides structures for both.

mod command;
mod embedded;
mod record;

pub use command::CommandStatusResponse;
pub use embedded::embedded_list;
pub use record::{ActuatorRecord, CreatedRecord, DeviceRecord, SensorRecord};
