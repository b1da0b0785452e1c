//! InPost Provider Module
//!
//! Implements the courier contracts against the InPost ShipX API:
//! shipment creation, tracking resolution and label retrieval.
//!
//! API Documentation: https://docs.inpost24.com/display/PL/API+ShipX

mod courier;
mod errors;
mod labels;
mod mapper;
pub mod models;
mod parcel;
mod session;
mod shipments;

#[cfg(test)]
pub(crate) mod test_support;

pub use courier::InpostCourier;
pub use errors::extract_error_message;
pub use labels::{InpostCourierGetLabels, LabelTarget};
pub use mapper::InpostMapper;
pub use parcel::InpostCourierMakeParcel;
pub use session::{InpostSession, SessionError};
pub use shipments::InpostCourierCreateShipment;
