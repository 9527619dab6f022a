//! The uplink decoding pipeline.
//!
//! ```text
//! payload bytes ──▶ codec ──▶ JSON value ─────────────┐
//! topicName ──────▶ router ─▶ (serial, category) ─▶ translator ─▶ assemble ─▶ OutputRecord
//! ```
//!
//! Only codec and slice errors abort a message. An unmatched topic still
//! produces a record carrying the device descriptor.

use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::Result;
use crate::message::{Metadata, Payload, RawMessage};
use crate::record::{assemble, DeviceDescriptor, OutputRecord};
use crate::topic::{Category, TopicRouter, TopicRule};
use crate::translate::translate;

/// Decoder for one gateway profile. Stateless between calls.
#[derive(Debug, Clone, Default)]
pub struct UplinkDecoder {
    descriptor: DeviceDescriptor,
    router: TopicRouter,
}

/// Decoder with the built-in gateway profile.
pub static DEFAULT_DECODER: Lazy<UplinkDecoder> = Lazy::new(UplinkDecoder::default);

impl UplinkDecoder {
    pub fn new(descriptor: DeviceDescriptor, router: TopicRouter) -> Self {
        Self { descriptor, router }
    }

    pub fn builder() -> UplinkDecoderBuilder {
        UplinkDecoderBuilder::default()
    }

    pub fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    pub fn router(&self) -> &TopicRouter {
        &self.router
    }

    /// Decode one uplink.
    pub fn decode(&self, payload: &Payload, metadata: &Metadata) -> Result<OutputRecord> {
        let data = payload.decode()?;

        let route = metadata.topic().and_then(|topic| self.router.route(topic));
        let (serial, telemetry) = match route {
            Some(route) => {
                let telemetry = translate(route.category, &data)?;
                debug!(
                    "Decoded {} uplink from '{}': {} fields",
                    route.category,
                    route.serial,
                    telemetry.len()
                );
                (Some(route.serial), Some(telemetry))
            }
            None => {
                debug!("No topic rule for {:?}, descriptor only", metadata.topic());
                (None, None)
            }
        };

        Ok(assemble(&self.descriptor, serial, telemetry))
    }

    pub fn decode_message(&self, message: &RawMessage) -> Result<OutputRecord> {
        self.decode(&message.payload, &message.metadata)
    }

    /// Host wire contract: payload text and metadata JSON in, record JSON out.
    pub fn decode_wire(&self, payload_text: &str, metadata_json: &str) -> Result<String> {
        let metadata = Metadata::from_json(metadata_json)?;
        let payload = Payload::Text(payload_text.to_string());
        self.decode(&payload, &metadata)?.to_json()
    }
}

/// Builder for decoders with a custom descriptor or rule list.
#[derive(Debug, Default)]
pub struct UplinkDecoderBuilder {
    descriptor: Option<DeviceDescriptor>,
    rules: Vec<TopicRule>,
}

impl UplinkDecoderBuilder {
    /// Override the device descriptor.
    pub fn descriptor(mut self, name: impl Into<String>, device_type: impl Into<String>) -> Self {
        self.descriptor = Some(DeviceDescriptor::new(name, device_type));
        self
    }

    /// Append a rule. Rules are evaluated in the order they are added.
    pub fn rule(mut self, pattern: impl Into<String>, category: Category) -> Self {
        self.rules.push(TopicRule::new(pattern, category));
        self
    }

    /// Build the decoder. Without any rules the built-in ones are used.
    pub fn build(self) -> UplinkDecoder {
        let router = if self.rules.is_empty() {
            TopicRouter::gateway_default()
        } else {
            TopicRouter::new(self.rules)
        };
        UplinkDecoder::new(self.descriptor.unwrap_or_default(), router)
    }
}
