//! Review bridge: JSON wire codec between the review core and its host.
mod decode;
mod encode;
mod error;
mod sink;
mod wire;

pub use decode::decode_inbound;
pub use encode::{encode_outbound, OutboundMessage};
pub use error::BridgeError;
pub use sink::{ChannelSink, HostSink, WriterSink};
