// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `smarthome_client` - client-side components for a smart-home backend.
//!
//! This library provides async building blocks to register sensors and
//! actuators on a device and to drive actuator positions over an HTTP+JSON
//! backend.
//!
//! # Components
//!
//! - **Registration form**: schema-driven sensor/actuator drafts, type
//!   catalogs, single-flight submission ([`form`])
//! - **Actuator control**: slider-style position control with explicit
//!   commit and transient feedback ([`control`])
//! - **Device functionalities**: listings of a device's sensors and
//!   actuators kept in sync with both components ([`functionalities`])
//!
//! # Quick Start
//!
//! ## Registering an actuator
//!
//! ```no_run
//! use std::sync::Arc;
//! use smarthome_client::form::RegistrationForm;
//! use smarthome_client::protocol::HttpClient;
//! use smarthome_client::types::FunctionalityKind;
//!
//! #[tokio::main]
//! async fn main() -> smarthome_client::Result<()> {
//!     let backend = Arc::new(HttpClient::new("http://localhost:8080")?);
//!
//!     // Fetches the actuator type catalog
//!     let form = RegistrationForm::open(backend, "d1", FunctionalityKind::Actuator).await;
//!     form.on_added(|record| println!("Created {:?}", record.body()));
//!
//!     form.set_field("actuatorName", "Blind1");
//!     form.set_field("actuatorTypeID", "DecimalValueActuator");
//!     for field in form.visible_fields() {
//!         println!("{} ({:?})", field.label, field.input);
//!     }
//!
//!     form.set_field("upperLimit", "10");
//!     form.set_field("lowerLimit", "0");
//!     form.set_field("precision", "0.5");
//!     form.submit().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Setting a roller-blind position
//!
//! ```no_run
//! use std::sync::Arc;
//! use smarthome_client::control::ControlWidget;
//! use smarthome_client::protocol::HttpConfig;
//! use smarthome_client::types::Position;
//!
//! #[tokio::main]
//! async fn main() -> smarthome_client::Result<()> {
//!     let backend = Arc::new(HttpConfig::from_url("http://localhost:8080")?.into_client()?);
//!
//!     let control = ControlWidget::new(backend, "a1", Position::new(50)?);
//!     control.drag(Position::new(80)?);
//!
//!     let outcome = control.commit().await;
//!     println!("{outcome:?}, feedback: {:?}", control.feedback());
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod control;
pub mod error;
pub mod form;
pub mod functionalities;
pub mod protocol;
pub mod response;
pub mod types;

pub use control::{CommitOutcome, ControlPhase, ControlWidget, Feedback, FeedbackKind};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use form::{FormPhase, FunctionalityDraft, RegistrationForm, SubmitOutcome};
pub use functionalities::{DeviceFunctionalities, SharedFunctionalities};
pub use protocol::{ApiResponse, Backend};
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use types::{FunctionalityKind, FunctionalitySchema, Position, TypeDescriptor};
