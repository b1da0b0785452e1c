//! Parcel factory

use crate::domain::Parcel;
use crate::providers::traits::CourierMakeParcel;

#[derive(Debug, Clone, Copy, Default)]
pub struct InpostCourierMakeParcel;

impl CourierMakeParcel for InpostCourierMakeParcel {
    fn make_parcel(&self) -> Parcel {
        Parcel::default()
    }
}
