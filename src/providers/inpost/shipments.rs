//! Shipment creation and tracking resolution

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::domain::{CourierError, Response, Shipment};
use crate::providers::http_client::{path_segment, ApiRequest};
use crate::providers::traits::CourierCreateShipment;
use super::errors::{decode_error, from_transport};
use super::mapper::InpostMapper;
use super::models::{CreatedShipment, ShipmentItem, ShipmentList};
use super::session::InpostSession;

const API_PATH: &str = "/v1/organizations/:organization_id/shipments";

/// Which identifier a shipment lookup filters on
#[derive(Debug, Clone, Copy)]
enum Lookup {
    TrackingNumber,
    ShipmentId,
}

impl Lookup {
    fn query_key(self) -> &'static str {
        match self {
            Lookup::TrackingNumber => "tracking_number",
            Lookup::ShipmentId => "id",
        }
    }

    fn not_found(self, value: &str) -> CourierError {
        let message = match self {
            Lookup::TrackingNumber => format!("Shipment (tracking_id: {}) does not exist.", value),
            Lookup::ShipmentId => format!("Shipment (id: {}) does not exist.", value),
        };
        CourierError::NotFound(message)
    }

    /// `(matched identifier, counterpart)` of an item
    fn split(self, item: ShipmentItem) -> (Option<String>, Option<String>) {
        match self {
            Lookup::TrackingNumber => (item.tracking_number, item.id),
            Lookup::ShipmentId => (item.id, item.tracking_number),
        }
    }
}

/// ShipX shipment operations
#[derive(Debug, Clone)]
pub struct InpostCourierCreateShipment {
    session: InpostSession,
}

impl InpostCourierCreateShipment {
    pub fn new(session: InpostSession) -> Self {
        InpostCourierCreateShipment { session }
    }

    fn path(&self) -> String {
        API_PATH.replace(":organization_id", &path_segment(self.session.parameters().organization_id()))
    }

    /// Look up the counterpart identifier of `value`
    async fn lookup(&self, lookup: Lookup, value: &str) -> Result<String, CourierError> {
        let request = ApiRequest::get(self.path()).query(lookup.query_key(), value);
        let response = self.session.client().send(request).await.map_err(from_transport)?;

        let body: Value = parse_body(&response.body)?;

        // Any shape other than `{"items": [one item]}` means no such shipment
        let mut items = serde_json::from_value::<ShipmentList>(body)
            .ok()
            .and_then(|list| list.items)
            .unwrap_or_default();
        if items.len() != 1 {
            debug!(matches = items.len(), "Shipment lookup did not return exactly one item");
            return Err(lookup.not_found(value));
        }

        match lookup.split(items.remove(0)) {
            (Some(matched), Some(counterpart)) if matched == value => Ok(counterpart),
            _ => Err(lookup.not_found(value)),
        }
    }

    async fn submit(&self, shipment: &Shipment) -> Result<String, CourierError> {
        let payload = InpostMapper::build_payload(shipment, self.session.parameters());
        let body = serde_json::to_value(&payload).map_err(|e| CourierError::Unexpected {
            message: format!("failed to encode shipment payload: {}", e),
            code: 0,
        })?;

        debug!(parcels = payload.parcels.len(), "Submitting shipment");
        let response = self
            .session
            .client()
            .send(ApiRequest::post_json(self.path(), body))
            .await
            .map_err(from_transport)?;

        let created: CreatedShipment = serde_json::from_value(parse_body(&response.body)?)
            .map_err(|_| decode_error())?;

        Ok(created.id)
    }
}

/// Parse a JSON body; an empty body reads as `null`
fn parse_body(body: &[u8]) -> Result<Value, CourierError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|_| decode_error())
}

#[async_trait]
impl CourierCreateShipment for InpostCourierCreateShipment {
    #[instrument(skip(self))]
    async fn resolve_shipment_id(&self, tracking_id: &str) -> Response {
        match self.lookup(Lookup::TrackingNumber, tracking_id).await {
            Ok(shipment_id) => Response::success(Some(shipment_id), Some(tracking_id.to_string())),
            Err(err) => {
                warn!(error = %err, "Shipment id resolution failed");
                Response::failure(err)
            }
        }
    }

    #[instrument(skip(self))]
    async fn resolve_tracking_id(&self, shipment_id: &str) -> Response {
        match self.lookup(Lookup::ShipmentId, shipment_id).await {
            Ok(tracking_id) => Response::success(Some(shipment_id.to_string()), Some(tracking_id)),
            Err(err) => {
                warn!(error = %err, "Tracking number resolution failed");
                Response::failure(err)
            }
        }
    }

    #[instrument(skip(self, shipment), fields(reference = %shipment.content))]
    async fn create_shipment(&self, shipment: &Shipment) -> Response {
        match self.submit(shipment).await {
            Ok(shipment_id) => {
                info!(shipment_id = %shipment_id, "Shipment created");
                // Tracking numbers are assigned later by the courier
                Response::success(Some(shipment_id), None)
            }
            Err(err) => {
                warn!(error = %err, "Shipment creation failed");
                Response::failure(err)
            }
        }
    }
}
