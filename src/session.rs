use tracing::{debug, warn};

use crate::config::Config;
use crate::nodes_to_json;
use crate::model::Node;
use crate::parser::parse;
use crate::protocol::{EditorMessage, MessageBody};
use crate::serializer::{SerializeOptions, serialize_with};

/// Document state held by the editing surface.
///
/// The node list is only ever swapped for a new one; callers get shared
/// references and hand back whole replacements.
#[derive(Debug, Clone)]
pub struct Session {
    version: String,
    options: SerializeOptions,
    nodes: Vec<Node>,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            version: config.protocol.version.clone(),
            options: config.serialize.options(),
            nodes: Vec::new(),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Swap in an edited document, returning the previous one.
    pub fn replace(&mut self, nodes: Vec<Node>) -> Vec<Node> {
        std::mem::replace(&mut self.nodes, nodes)
    }

    /// React to a message from the host. Returns the reply to send back, if
    /// any.
    pub fn handle(&mut self, message: EditorMessage) -> Option<EditorMessage> {
        match message.body {
            MessageBody::Load { source } => {
                let nodes = parse(&source);
                debug!(nodes = nodes.len(), "loaded document");
                self.nodes = nodes;
                None
            }
            // The host asks for the current document
            MessageBody::Save { .. } => Some(self.save_message()),
            MessageBody::Update { .. } => {
                warn!("surface received an update message");
                Some(EditorMessage::error(
                    self.version.as_str(),
                    "unexpected `update` message sent to the editing surface",
                ))
            }
            MessageBody::Error { diagnostic } => {
                warn!(%diagnostic, "host reported an error");
                None
            }
        }
    }

    /// A `save` message with the current document, or an `error` message if
    /// the document cannot be serialized. State is left untouched either
    /// way.
    pub fn save_message(&self) -> EditorMessage {
        match serialize_with(&self.nodes, &self.options) {
            Ok(markdown) => EditorMessage::save(self.version.as_str(), markdown),
            Err(error) => self.report(error),
        }
    }

    /// An `update` message carrying the node tree as JSON, for state that
    /// has not been saved yet.
    pub fn update_message(&self) -> EditorMessage {
        match nodes_to_json(&self.nodes) {
            Ok(snapshot) => EditorMessage::update(self.version.as_str(), snapshot),
            Err(error) => self.report(error),
        }
    }

    fn report(&self, error: impl std::error::Error) -> EditorMessage {
        warn!(%error, "cannot serialize document");
        EditorMessage::error(self.version.as_str(), error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeKind, TextRun};
    use crate::protocol::MessageType;

    fn session() -> Session {
        Session::new(&Config::compiled_default())
    }

    #[test]
    fn load_replaces_state() {
        let mut session = session();
        assert!(session.handle(EditorMessage::load("1", "# A\nbody")).is_none());
        assert_eq!(session.nodes().len(), 2);

        session.handle(EditorMessage::load("1", ""));
        assert!(session.nodes().is_empty());
    }

    #[test]
    fn save_serializes_current_state() {
        let mut session = session();
        session.handle(EditorMessage::load("1", "#  A \n\n> q"));
        let message = session.save_message();
        assert_eq!(message.body, MessageBody::Save { markdown: "# A\n> q".into() });
        assert_eq!(message.version, "1");
    }

    #[test]
    fn edits_show_up_in_updates() {
        let mut session = session();
        session.handle(EditorMessage::load("1", "old"));
        let mut edited = session.nodes().to_vec();
        edited.push(Node::with_text(NodeKind::Heading3, TextRun::plain("new")));
        let previous = session.replace(edited);

        assert_eq!(previous.len(), 1);
        let update = session.update_message();
        assert_eq!(update.message_type(), MessageType::Update);
        let snapshot = crate::nodes_from_json(update.body.content()).unwrap();
        assert_eq!(snapshot, session.nodes());
        assert_eq!(session.save_message().body.content(), "old\n### new");
    }

    #[test]
    fn invalid_state_becomes_an_error_message() {
        let mut session = session();
        session.handle(EditorMessage::load("1", "keep me"));
        let mut edited = session.nodes().to_vec();
        edited.push(Node::new(NodeKind::Paragraph, Vec::new()));
        session.replace(edited);

        let message = session.save_message();
        assert_eq!(message.message_type(), MessageType::Error);
        assert!(message.body.content().contains("index 1"));
        assert_eq!(session.nodes().len(), 2);
    }

    #[test]
    fn save_request_is_answered_with_the_document() {
        let mut session = session();
        session.handle(EditorMessage::load("1", "#  x "));
        let reply = session.handle(EditorMessage::save("1", "")).unwrap();
        assert_eq!(reply.body, MessageBody::Save { markdown: "# x".into() });
        assert_eq!(session.nodes().len(), 1);
    }

    #[test]
    fn update_and_error_from_the_host_leave_state_alone() {
        let mut session = session();
        session.handle(EditorMessage::load("1", "x"));
        let reply = session.handle(EditorMessage::update("1", "[]")).unwrap();
        assert_eq!(reply.message_type(), MessageType::Error);
        assert_eq!(session.nodes().len(), 1);

        assert!(session.handle(EditorMessage::error("1", "disk full")).is_none());
        assert_eq!(session.nodes().len(), 1);
    }

    #[test]
    fn join_runs_follows_config() {
        let config = Config::from_toml_str("[serialize]\njoin_runs = true").unwrap();
        let mut session = Session::new(&config);
        session.replace(vec![Node::new(
            NodeKind::Paragraph,
            vec![TextRun::plain("a").into(), TextRun::plain("b").italic(true).into()],
        )]);
        assert_eq!(session.save_message().body.content(), "ab");
    }
}
