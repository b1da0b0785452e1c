//! ShipX API Wire Models
//!
//! Request payloads sent to and response bodies received from the ShipX API.
//! Domain shipments are mapped onto these in the mapper module.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Shipment Creation Request
// ============================================================================

/// Body of `POST /v1/organizations/{organization_id}/shipments`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipmentRequest {
    pub receiver: ReceiverPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<SenderPayload>,
    pub parcels: Vec<ParcelPayload>,
    pub reference: String,
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_attributes: Option<CustomAttributes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cod: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiverPayload {
    pub company_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: String,
    pub address: AddressPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SenderPayload {
    pub company_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: AddressPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressPayload {
    pub street: String,
    pub building_number: String,
    pub city: String,
    pub post_code: String,
    pub country_code: String,
}

/// Parcel entry. `id` is only present for multi-parcel shipments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParcelPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub dimensions: DimensionsPayload,
    pub weight: WeightPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionsPayload {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightPayload {
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sending_method: Option<String>,
}

impl CustomAttributes {
    pub fn is_empty(&self) -> bool {
        self.target_point.is_none() && self.sending_method.is_none()
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Shipment search result (`GET .../shipments?tracking_number=` or `?id=`)
#[derive(Debug, Deserialize)]
pub struct ShipmentList {
    #[serde(default)]
    pub items: Option<Vec<ShipmentItem>>,
}

/// Shipment as listed by the search endpoint
///
/// ShipX sends numeric ids; both identifiers are kept as strings so they
/// compare equal to the caller's input.
#[derive(Debug, Deserialize)]
pub struct ShipmentItem {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub tracking_number: Option<String>,
}

/// Created shipment (`POST .../shipments`)
#[derive(Debug, Deserialize)]
pub struct CreatedShipment {
    #[serde(deserialize_with = "required_id")]
    pub id: String,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
}

// ============================================================================
// Serialization Helpers
// ============================================================================

fn id_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(id_to_string))
}

fn required_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    id_to_string(value).ok_or_else(|| serde::de::Error::custom("shipment id must be a string or number"))
}
