//! Courier contract definitions
//!
//! Provider adapters implement these traits so callers can create shipments
//! and fetch labels without knowing which courier is behind them. Every
//! operation answers with a result carrier; failures are attached to it
//! rather than returned as `Err`.

use async_trait::async_trait;

use crate::domain::{Label, LabelFile, LabelFormat, Parcel, Response, Shipment};

/// Shipment creation and identifier resolution
#[async_trait]
pub trait CourierCreateShipment: Send + Sync {
    /// Resolve a tracking number to the courier's shipment id
    async fn resolve_shipment_id(&self, tracking_id: &str) -> Response;

    /// Resolve a shipment id to its tracking number
    async fn resolve_tracking_id(&self, shipment_id: &str) -> Response;

    /// Register a new shipment. Success carries the shipment id only.
    async fn create_shipment(&self, shipment: &Shipment) -> Response;
}

/// Label retrieval
#[async_trait]
pub trait CourierGetLabels: Send + Sync {
    /// Label content for one shipment
    async fn get_label(&self, shipment_id: &str) -> Label;

    /// Label document for one shipment id or a comma-separated list of ids
    async fn get_label_file(&self, shipment_ids: &str, format: LabelFormat) -> LabelFile;
}

/// Parcel factory
pub trait CourierMakeParcel {
    fn make_parcel(&self) -> Parcel;
}
