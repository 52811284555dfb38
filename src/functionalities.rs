// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensors and actuators installed on a device.
//!
//! [`DeviceFunctionalities`] holds the in-memory lists a device page shows.
//! It is the receiving end of the registration form's "added" callback and
//! of the control widget's "updated" callback: [`attach_form`] and
//! [`attach_control`] wire both so the lists follow what the backend
//! confirmed.
//!
//! [`attach_form`]: DeviceFunctionalities::attach_form
//! [`attach_control`]: DeviceFunctionalities::attach_control

use std::sync::Arc;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::control::ControlWidget;
use crate::error::ParseError;
use crate::form::RegistrationForm;
use crate::protocol::Backend;
use crate::response::{
    ActuatorRecord, CreatedRecord, DeviceRecord, SensorRecord, embedded_list,
};
use crate::types::{FunctionalityKind, Position};

/// Functionality lists shared between a page and its callbacks.
pub type SharedFunctionalities = Arc<Mutex<DeviceFunctionalities>>;

/// The sensors and actuators of one device.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use parking_lot::Mutex;
/// use smarthome_client::functionalities::DeviceFunctionalities;
/// use smarthome_client::protocol::HttpClient;
///
/// # async fn example() -> smarthome_client::Result<()> {
/// let backend = Arc::new(HttpClient::new("http://localhost:8080")?);
/// let device = DeviceFunctionalities::load(&*backend, "d1").await;
///
/// for actuator in device.actuators() {
///     println!("{} ({})", actuator.actuator_name, actuator.actuator_type_id.label());
/// }
///
/// let shared = Arc::new(Mutex::new(device));
/// let controls = shared.lock().controls(&backend);
/// for control in &controls {
///     DeviceFunctionalities::attach_control(&shared, control);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceFunctionalities {
    device_id: String,
    active: bool,
    actuators: Vec<ActuatorRecord>,
    sensors: Vec<SensorRecord>,
}

impl DeviceFunctionalities {
    /// Creates empty lists for an inactive device.
    #[must_use]
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            ..Self::default()
        }
    }

    /// Loads the device status and its actuator and sensor lists.
    ///
    /// Each part degrades independently: a listing that cannot be fetched or
    /// parsed is empty, and a device whose status cannot be read is treated
    /// as inactive.
    pub async fn load<B: Backend>(backend: &B, device_id: impl Into<String>) -> Self {
        let device_id = device_id.into();
        let encoded = urlencoding::encode(&device_id).into_owned();

        let active = fetch_device_active(backend, &encoded).await;
        let actuators = fetch_records(backend, FunctionalityKind::Actuator, &encoded).await;
        let sensors = fetch_records(backend, FunctionalityKind::Sensor, &encoded).await;

        tracing::debug!(
            device = %device_id,
            active,
            actuators = actuators.len(),
            sensors = sensors.len(),
            "Loaded device functionalities"
        );

        Self {
            device_id,
            active,
            actuators,
            sensors,
        }
    }

    /// Returns the device these lists belong to.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns `true` if the backend reports the device as active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns `true` if new sensors or actuators may be added.
    ///
    /// Only active devices accept new functionalities.
    #[must_use]
    pub fn can_add_functionality(&self) -> bool {
        self.active
    }

    /// Returns the listed actuators.
    #[must_use]
    pub fn actuators(&self) -> &[ActuatorRecord] {
        &self.actuators
    }

    /// Returns the listed sensors.
    #[must_use]
    pub fn sensors(&self) -> &[SensorRecord] {
        &self.sensors
    }

    /// Returns the actuator with the given id.
    #[must_use]
    pub fn actuator(&self, actuator_id: &str) -> Option<&ActuatorRecord> {
        self.actuators.iter().find(|a| a.actuator_id == actuator_id)
    }

    /// Appends an actuator to the listing.
    pub fn add_actuator(&mut self, actuator: ActuatorRecord) {
        self.actuators.push(actuator);
    }

    /// Appends a sensor to the listing.
    pub fn add_sensor(&mut self, sensor: SensorRecord) {
        self.sensors.push(sensor);
    }

    /// Appends a record the backend created to the matching listing.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the record body does not match its kind.
    pub fn add_record(&mut self, record: &CreatedRecord) -> Result<(), ParseError> {
        match record.kind() {
            FunctionalityKind::Actuator => self.add_actuator(record.as_actuator()?),
            FunctionalityKind::Sensor => self.add_sensor(record.as_sensor()?),
        }
        Ok(())
    }

    /// Records a newly confirmed actuator position.
    ///
    /// Returns `false` if no actuator with that id is listed.
    pub fn update_actuator_status(&mut self, actuator_id: &str, position: Position) -> bool {
        match self
            .actuators
            .iter_mut()
            .find(|a| a.actuator_id == actuator_id)
        {
            Some(actuator) => {
                actuator.status = Some(Value::from(position.value()));
                true
            }
            None => false,
        }
    }

    /// Creates a live control for an actuator that supports one.
    ///
    /// Returns `None` for unknown actuators and for types without a
    /// position control.
    #[must_use]
    pub fn control_for<B: Backend>(
        &self,
        backend: &Arc<B>,
        actuator_id: &str,
    ) -> Option<ControlWidget<B>> {
        self.actuator(actuator_id)
            .filter(|a| a.has_position_control())
            .map(|a| ControlWidget::from_record(Arc::clone(backend), a))
    }

    /// Creates live controls for every actuator that supports one.
    #[must_use]
    pub fn controls<B: Backend>(&self, backend: &Arc<B>) -> Vec<ControlWidget<B>> {
        self.actuators
            .iter()
            .filter(|a| a.has_position_control())
            .map(|a| ControlWidget::from_record(Arc::clone(backend), a))
            .collect()
    }

    /// Opens a registration form for this device.
    ///
    /// Returns `None` if the device is inactive.
    pub async fn open_form<B: Backend>(
        &self,
        backend: &Arc<B>,
        kind: FunctionalityKind,
    ) -> Option<RegistrationForm<B>> {
        if !self.can_add_functionality() {
            tracing::debug!(device = %self.device_id, "Device inactive, not opening form");
            return None;
        }
        Some(RegistrationForm::open(Arc::clone(backend), self.device_id.clone(), kind).await)
    }

    /// Appends every record created through `form` to the shared lists.
    pub fn attach_form<B: Backend>(shared: &SharedFunctionalities, form: &RegistrationForm<B>) {
        let shared = Arc::clone(shared);
        form.on_added(move |record| {
            if let Err(e) = shared.lock().add_record(record) {
                tracing::warn!(error = %e, "Created record could not be listed");
            }
        });
    }

    /// Updates the shared lists with every position `control` confirms.
    pub fn attach_control<B: Backend>(shared: &SharedFunctionalities, control: &ControlWidget<B>) {
        let shared = Arc::clone(shared);
        let actuator_id = control.actuator_id().to_string();
        control.on_updated(move |position| {
            if !shared.lock().update_actuator_status(&actuator_id, position) {
                tracing::warn!(actuator = %actuator_id, "Updated actuator is not listed");
            }
        });
    }
}

async fn fetch_device_active<B: Backend>(backend: &B, encoded_id: &str) -> bool {
    let path = format!("/devices/{encoded_id}");
    match backend.get(&path).await.map(|r| r.parse::<DeviceRecord>()) {
        Ok(Ok(device)) => device.is_active(),
        Ok(Err(e)) => {
            tracing::warn!(path = %path, error = %e, "Malformed device record");
            false
        }
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Failed to fetch device status");
            false
        }
    }
}

async fn fetch_records<B: Backend, T: DeserializeOwned>(
    backend: &B,
    kind: FunctionalityKind,
    encoded_device_id: &str,
) -> Vec<T> {
    let path = format!("{}?deviceId={encoded_device_id}", kind.collection_path());
    let body = match backend.get(&path).await.map(|r| r.json()) {
        Ok(Ok(body)) => body,
        Ok(Err(e)) => {
            tracing::warn!(path = %path, error = %e, "Malformed {kind} listing");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Failed to fetch {kind} listing");
            return Vec::new();
        }
    };

    let Some(entries) = embedded_list(&body, kind.record_list_key()) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match T::deserialize(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed {kind} entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::protocol::mock::{MockBackend, MockReply};

    fn scripted_backend() -> Arc<MockBackend> {
        let backend = Arc::new(MockBackend::new());
        backend.reply("/devices/d1", MockReply::json(&json!({"deviceStatus": true})));
        backend.reply(
            "/actuators?deviceId=d1",
            MockReply::json(&json!({
                "_embedded": {"actuatorDTOList": [
                    {"actuatorId": "a1", "actuatorName": "Blind", "actuatorTypeID": "RollerBlindActuator", "status": "50"},
                    {"actuatorId": "a2", "actuatorName": "Switch", "actuatorTypeID": "SwitchActuator"},
                    {"actuatorName": "Broken"}
                ]}
            })),
        );
        backend.reply("/sensors?deviceId=d1", MockReply::json(&json!({"_links": {}})));
        backend
    }

    #[tokio::test]
    async fn load_lists_and_status() {
        let backend = scripted_backend();
        let device = DeviceFunctionalities::load(&*backend, "d1").await;

        assert!(device.is_active());
        assert_eq!(device.actuators().len(), 2);
        assert!(device.sensors().is_empty());
        assert_eq!(device.actuator("a1").unwrap().actuator_name, "Blind");
    }

    #[tokio::test]
    async fn unreachable_backend_yields_inactive_empty_device() {
        let backend = MockBackend::new();
        let device = DeviceFunctionalities::load(&backend, "d1").await;
        assert_eq!(
            device,
            DeviceFunctionalities {
                device_id: "d1".to_string(),
                ..DeviceFunctionalities::default()
            }
        );
        assert!(!device.can_add_functionality());
    }

    #[tokio::test]
    async fn only_roller_blinds_get_controls() {
        let backend = scripted_backend();
        let device = DeviceFunctionalities::load(&*backend, "d1").await;

        let controls = device.controls(&backend);
        assert_eq!(controls.len(), 1);
        assert_eq!(controls[0].confirmed().value(), 50);
        assert!(device.control_for(&backend, "a2").is_none());
        assert!(device.control_for(&backend, "missing").is_none());
    }

    #[tokio::test]
    async fn attached_control_updates_listed_status() {
        let backend = scripted_backend();
        backend.reply(
            "/actuators/a1/act?command=80",
            MockReply::json(&json!({"status": "80"})),
        );
        let shared = Arc::new(Mutex::new(DeviceFunctionalities::load(&*backend, "d1").await));
        let control = shared.lock().control_for(&backend, "a1").unwrap();
        DeviceFunctionalities::attach_control(&shared, &control);

        control.drag(Position::new(80).unwrap());
        control.commit().await;

        assert_eq!(
            shared.lock().actuator("a1").unwrap().status,
            Some(json!(80))
        );
    }

    #[tokio::test]
    async fn attached_form_appends_created_records() {
        let backend = scripted_backend();
        backend.reply(
            "/sensors",
            MockReply::json(&json!({"sensorId": "s1", "sensorName": "Hall", "sensorTypeID": "HumiditySensor"})),
        );
        let device = DeviceFunctionalities::load(&*backend, "d1").await;
        let form = device
            .open_form(&backend, FunctionalityKind::Sensor)
            .await
            .unwrap();
        let shared = Arc::new(Mutex::new(device));
        DeviceFunctionalities::attach_form(&shared, &form);

        form.set_field("sensorName", "Hall");
        assert!(form.submit().await.is_created());

        let device = shared.lock();
        assert_eq!(device.sensors().len(), 1);
        assert_eq!(device.sensors()[0].sensor_id, "s1");
    }

    #[tokio::test]
    async fn inactive_device_refuses_form() {
        let backend = Arc::new(MockBackend::new());
        let device = DeviceFunctionalities::new("d1");
        assert!(
            device
                .open_form(&backend, FunctionalityKind::Actuator)
                .await
                .is_none()
        );
    }

    #[test]
    fn update_unknown_actuator() {
        let mut device = DeviceFunctionalities::new("d1");
        assert!(!device.update_actuator_status("a1", Position::MAX));
    }
}
