//! InPost Courier
//!
//! Client adapter for the InPost ShipX parcel-courier API. Creates
//! shipments, resolves tracking numbers to shipment ids (and back) and
//! fetches labels, single or batched, in several formats.
//!
//! Every operation returns a result carrier (`Response`, `Label`,
//! `LabelFile`). Failures are attached to it instead of being returned as
//! `Err`, so callers check `errors()` to tell success from failure.
//!
//! ```no_run
//! use inpost_courier::{InpostCourier, Settings, CourierCreateShipment};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let courier = InpostCourier::from_settings(&Settings::load()?)?;
//! let response = courier.resolve_shipment_id("520000012345678901234567").await;
//! if let Some(err) = response.first_error() {
//!     eprintln!("lookup failed: {}", err);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod logging;
pub mod providers;

pub use crate::config::{ApiSettings, InpostParameters, Settings};
pub use crate::domain::{
    CourierError, ErrorKind, Label, LabelFile, LabelFormat, Parcel, Parcels, Party, Response, Shipment,
};
pub use crate::providers::inpost::{InpostCourier, InpostSession};
pub use crate::providers::{CourierCreateShipment, CourierGetLabels, CourierMakeParcel};
