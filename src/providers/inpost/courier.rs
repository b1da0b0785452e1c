//! InPost courier facade
//!
//! One entry point bundling every InPost operation over a shared session.

use async_trait::async_trait;

use crate::config::Settings;
use crate::domain::{Label, LabelFile, LabelFormat, Parcel, Response, Shipment};
use crate::providers::traits::{CourierCreateShipment, CourierGetLabels, CourierMakeParcel};
use super::labels::InpostCourierGetLabels;
use super::parcel::InpostCourierMakeParcel;
use super::session::{InpostSession, SessionError};
use super::shipments::InpostCourierCreateShipment;

/// InPost ShipX courier
#[derive(Debug, Clone)]
pub struct InpostCourier {
    session: InpostSession,
    shipments: InpostCourierCreateShipment,
    labels: InpostCourierGetLabels,
}

impl InpostCourier {
    pub fn new(session: InpostSession) -> Self {
        InpostCourier {
            shipments: InpostCourierCreateShipment::new(session.clone()),
            labels: InpostCourierGetLabels::new(session.clone()),
            session,
        }
    }

    /// Build a courier talking to the API described by `settings`
    pub fn from_settings(settings: &Settings) -> Result<Self, SessionError> {
        InpostSession::from_settings(settings).map(Self::new)
    }

    pub fn session(&self) -> &InpostSession {
        &self.session
    }
}

#[async_trait]
impl CourierCreateShipment for InpostCourier {
    async fn resolve_shipment_id(&self, tracking_id: &str) -> Response {
        self.shipments.resolve_shipment_id(tracking_id).await
    }

    async fn resolve_tracking_id(&self, shipment_id: &str) -> Response {
        self.shipments.resolve_tracking_id(shipment_id).await
    }

    async fn create_shipment(&self, shipment: &Shipment) -> Response {
        self.shipments.create_shipment(shipment).await
    }
}

#[async_trait]
impl CourierGetLabels for InpostCourier {
    async fn get_label(&self, shipment_id: &str) -> Label {
        self.labels.get_label(shipment_id).await
    }

    async fn get_label_file(&self, shipment_ids: &str, format: LabelFormat) -> LabelFile {
        self.labels.get_label_file(shipment_ids, format).await
    }
}

impl CourierMakeParcel for InpostCourier {
    fn make_parcel(&self) -> Parcel {
        InpostCourierMakeParcel.make_parcel()
    }
}
