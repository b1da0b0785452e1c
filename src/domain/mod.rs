//! Domain types and models

mod response;
pub mod shipment;

pub use response::{CourierError, ErrorKind, Label, LabelFile, LabelFormat, Response};
pub use shipment::{Parcel, Parcels, Party, Receiver, Sender, Shipment, ValidationError};
