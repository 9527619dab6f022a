//! Uplink decoder for the V2831 smart gateway.
//!
//! Turns one device uplink (payload bytes plus routing metadata) into a
//! normalized record of device identity and labeled telemetry.
//!
//! ## Architecture
//!
//! - **codec**: payload bytes to a JSON value tree
//! - **topic**: ordered topic rules, first match yields serial and category
//! - **translate**: per-category field translation through [`tables`]
//! - **record**: combines the device descriptor, serial and telemetry
//!
//! [`UplinkDecoder`] wires these together. Decoding is a pure function of its
//! input; the only shared state is read-only configuration.
//!
//! ## Example
//!
//! ```rust
//! use uplink_core::{decode_uplink, Metadata};
//!
//! let payload = br#"{"data":{"value":"Temp=21.5,Humid=60"}}"#;
//! let record = decode_uplink(payload, &Metadata::with_topic("data/ABC123/environment")).unwrap();
//! assert_eq!(record.serial(), Some("ABC123"));
//! assert_eq!(record.telemetry.unwrap().text("温度"), Some("21.5"));
//! ```

pub mod codec;
pub mod config;
pub mod decoder;
pub mod error;
pub mod message;
pub mod record;
pub mod tables;
pub mod topic;
pub mod translate;

pub use decoder::{UplinkDecoder, UplinkDecoderBuilder, DEFAULT_DECODER};
pub use error::{DecodeError, Result};
pub use message::{Metadata, Payload, RawMessage};
pub use record::{assemble, Attributes, DeviceDescriptor, OutputRecord};
pub use tables::{AlarmType, EnvironmentKey, Label, LockState, PowerPeriod, TranslationTable};
pub use topic::{Category, TopicMatch, TopicRouter, TopicRule, DEFAULT_ROUTER};
pub use translate::{FieldValue, Telemetry};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decode one uplink with the built-in gateway profile.
pub fn decode_uplink(payload: &[u8], metadata: &Metadata) -> Result<OutputRecord> {
    DEFAULT_DECODER.decode(&Payload::from(payload), metadata)
}

/// Host wire contract with the built-in gateway profile.
pub fn decode_wire(payload_text: &str, metadata_json: &str) -> Result<String> {
    DEFAULT_DECODER.decode_wire(payload_text, metadata_json)
}
