mod channel;
mod config;
mod error;
mod model;
mod parser;
mod protocol;
mod serializer;
mod session;

pub use channel::{Endpoint, pair};
pub use config::{Config, ProtocolConfig, SerializeConfig};
pub use error::{
    ChannelError, ConfigError, Error, InvalidNodeReason, ProtocolError, Result, SerializeError,
};
pub use model::{Child, Node, NodeKind, TextRun};
pub use parser::parse;
pub use protocol::{EditorMessage, MessageBody, MessageType, check, decode, validate};
pub use serializer::{SerializeOptions, serialize, serialize_with};
pub use session::Session;

/// Parse text and write it straight back out, collapsing whitespace the
/// grammar does not keep.
pub fn normalize(text: &str) -> std::result::Result<String, SerializeError> {
    serialize(&parse(text))
}

/// Read a node tree from its JSON form.
pub fn nodes_from_json(json: &str) -> Result<Vec<Node>> {
    serde_json::from_str(json).map_err(Error::Nodes)
}

/// JSON form of a node tree, pretty printed.
pub fn nodes_to_json(nodes: &[Node]) -> Result<String> {
    serde_json::to_string_pretty(nodes).map_err(Error::Nodes)
}
