//! Shipment to ShipX Payload Mapper
//!
//! Maps provider-agnostic shipments onto the ShipX creation payload. The
//! mapping is pure: the same shipment and parameters always give the same
//! payload.

use crate::config::InpostParameters;
use crate::domain::{Parcel, Parcels, Party, Shipment};
use super::models::*;

/// Mapper for ShipX shipment payloads
pub struct InpostMapper;

impl InpostMapper {
    /// Build the full creation payload
    pub fn build_payload(shipment: &Shipment, params: &InpostParameters) -> ShipmentRequest {
        let custom_attributes = CustomAttributes {
            target_point: params.target_point.clone(),
            sending_method: params.sending_method.clone(),
        };

        ShipmentRequest {
            receiver: Self::map_receiver(&shipment.receiver),
            sender: shipment.sender.as_ref().map(Self::map_sender),
            parcels: Self::map_parcels(&shipment.parcels),
            reference: shipment.content.clone(),
            service: params.service().to_string(),
            custom_attributes: (!custom_attributes.is_empty()).then_some(custom_attributes),
            cod: params.cod_object().cloned(),
            insurance: params.insurance_object().cloned(),
        }
    }

    /// Map parcels; only multi-parcel shipments carry wire ids
    pub fn map_parcels(parcels: &Parcels) -> Vec<ParcelPayload> {
        match parcels {
            Parcels::Single(parcel) => vec![Self::map_parcel(None, parcel)],
            Parcels::Multiple(entries) => entries
                .iter()
                .map(|(id, parcel)| Self::map_parcel(Some(id.clone()), parcel))
                .collect(),
        }
    }

    fn map_parcel(id: Option<String>, parcel: &Parcel) -> ParcelPayload {
        ParcelPayload {
            id,
            dimensions: DimensionsPayload {
                length: parcel.length,
                width: parcel.width,
                height: parcel.height,
            },
            weight: WeightPayload {
                amount: parcel.weight,
            },
        }
    }

    pub fn map_receiver(party: &Party) -> ReceiverPayload {
        ReceiverPayload {
            company_name: party.full_name.clone(),
            first_name: party.first_name.clone(),
            last_name: party.surname.clone(),
            email: party.email.clone(),
            phone: party.phone.clone(),
            address: Self::map_address(party),
        }
    }

    pub fn map_sender(party: &Party) -> SenderPayload {
        SenderPayload {
            company_name: party.full_name.clone(),
            email: party.email.clone(),
            phone: party.phone.clone(),
            address: Self::map_address(party),
        }
    }

    fn map_address(party: &Party) -> AddressPayload {
        AddressPayload {
            street: party.street.clone(),
            building_number: party.building_number(),
            city: party.city.clone(),
            post_code: party.zip_code.clone(),
            country_code: party.country_code.clone(),
        }
    }
}
