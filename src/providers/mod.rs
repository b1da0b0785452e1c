//! Courier Provider Integration Module
//!
//! Provider-agnostic courier contracts and the adapters implementing them.
//!
//! # Architecture
//!
//! ```text
//!          ┌──────────────────────────────────────────┐
//!          │ CourierCreateShipment / CourierGetLabels │
//!          └────────────────────┬─────────────────────┘
//!                               │
//!                        ┌──────┴──────┐
//!                        │   InPost    │
//!                        └──────┬──────┘
//!                               │
//!                        ┌──────┴──────┐
//!                        │  Transport  │
//!                        └─────────────┘
//! ```

pub mod traits;
pub mod http_client;
pub mod inpost;

// Re-export commonly used types
pub use traits::{
    CourierCreateShipment,
    CourierGetLabels,
    CourierMakeParcel,
};
pub use http_client::{ApiRequest, ApiResponse, HttpMethod, InpostHttpClient, Transport, TransportError};
