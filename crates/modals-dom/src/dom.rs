//! Arena-based document tree.
//!
//! Nodes are stored in a flat `Vec` arena and linked by index. Removing a
//! node detaches it from its parent but keeps its slot, so every
//! [`NodeId`] handed out stays valid. Queries walk from the root and
//! therefore only ever see attached nodes.

use crate::media::MediaState;
use modals_types::input::NodeId;

// ------------------------------------------------------------------
// Node types
// ------------------------------------------------------------------

/// The document: an arena of nodes plus the synthetic root.
#[derive(Debug, Clone)]
pub struct Document {
    pub nodes: Vec<Node>,
    pub root: NodeId,
}

/// A single node in the tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// The kind of node.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Document,
    Element(ElementData),
    Text(String),
}

/// Data associated with an Element node.
#[derive(Debug, Clone)]
pub struct ElementData {
    pub tag: TagName,
    pub attributes: Vec<Attribute>,
    pub media: MediaState,
}

/// An element attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

// ------------------------------------------------------------------
// TagName
// ------------------------------------------------------------------

/// Tag names the modal layer cares about. Anything else is kept as
/// `Unknown(String)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagName {
    Html,
    Head,
    Body,
    Title,
    Div,
    Span,
    P,
    A,
    Button,
    H1,
    H2,
    Header,
    Footer,
    Main,
    Section,
    Article,
    Aside,
    Dialog,
    Img,
    Iframe,
    Video,
    Audio,
    Unknown(String),
}

impl TagName {
    /// Parse a tag name (case-insensitive) into a `TagName` variant.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "html" => Self::Html,
            "head" => Self::Head,
            "body" => Self::Body,
            "title" => Self::Title,
            "div" => Self::Div,
            "span" => Self::Span,
            "p" => Self::P,
            "a" => Self::A,
            "button" => Self::Button,
            "h1" => Self::H1,
            "h2" => Self::H2,
            "header" => Self::Header,
            "footer" => Self::Footer,
            "main" => Self::Main,
            "section" => Self::Section,
            "article" => Self::Article,
            "aside" => Self::Aside,
            "dialog" => Self::Dialog,
            "img" => Self::Img,
            "iframe" => Self::Iframe,
            "video" => Self::Video,
            "audio" => Self::Audio,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Get the string representation of this tag name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Html => "html",
            Self::Head => "head",
            Self::Body => "body",
            Self::Title => "title",
            Self::Div => "div",
            Self::Span => "span",
            Self::P => "p",
            Self::A => "a",
            Self::Button => "button",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Main => "main",
            Self::Section => "section",
            Self::Article => "article",
            Self::Aside => "aside",
            Self::Dialog => "dialog",
            Self::Img => "img",
            Self::Iframe => "iframe",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Unknown(s) => s.as_str(),
        }
    }

    /// Returns `true` for elements whose `src` drives a media load
    /// (`iframe`, `video`, `audio`).
    pub fn is_media(&self) -> bool {
        matches!(self, Self::Iframe | Self::Video | Self::Audio)
    }
}

// ------------------------------------------------------------------
// ElementData
// ------------------------------------------------------------------

impl ElementData {
    /// Create a new `ElementData` with the given tag and no attributes.
    pub fn new(tag: TagName) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            media: MediaState::default(),
        }
    }

    /// Get an attribute value by name.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, replacing any previous value.
    ///
    /// Assigning `src` on a media element starts a fresh load, even when
    /// the value is unchanged.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
        if name == "src" && self.tag.is_media() {
            self.media.reload();
        }
    }

    /// Check if this element has a given CSS class.
    ///
    /// The `class` attribute value is split on ASCII whitespace and each
    /// token is compared to `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attribute("class")
            .map(|v| v.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Add a class token. Returns `false` if it was already present.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        let value = match self.get_attribute("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {class}", existing.trim_end())
            },
            _ => class.to_string(),
        };
        self.set_attribute("class", &value);
        true
    }

    /// Remove every occurrence of a class token. Returns `true` if it
    /// was present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let Some(existing) = self.get_attribute("class") else {
            return false;
        };
        if !existing.split_ascii_whitespace().any(|c| c == class) {
            return false;
        }
        let value = existing
            .split_ascii_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute("class", &value);
        true
    }

    /// Get the `id` attribute if present.
    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id")
    }

    /// Get the `src` attribute if present (for media).
    pub fn src(&self) -> Option<&str> {
        self.get_attribute("src")
    }

    /// Read a `data-*` attribute by its suffix, e.g. `data("modal-id")`.
    pub fn data(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.strip_prefix("data-") == Some(key))
            .map(|a| a.value.as_str())
    }
}

// ------------------------------------------------------------------
// Document
// ------------------------------------------------------------------

impl Document {
    /// Create an empty document with a synthetic `Document` root node.
    pub fn new() -> Self {
        let root_node = Node {
            kind: NodeKind::Document,
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root_node],
            root: 0,
        }
    }

    /// Add a new, detached node to the arena and return its [`NodeId`].
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create `<html><head><title>…</title></head><body></body></html>`.
    pub fn with_title(title: &str) -> Self {
        let mut doc = Self::new();
        let html = doc.append_element(doc.root, "html", &[]);
        let head = doc.append_element(html, "head", &[]);
        let title_el = doc.append_element(head, "title", &[]);
        if !title.is_empty() {
            doc.append_text(title_el, title);
        }
        doc.append_element(html, "body", &[]);
        doc
    }

    /// Create a detached element with the given tag.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.add_node(NodeKind::Element(ElementData::new(TagName::from_str(tag))))
    }

    /// Create an element with `attrs` and append it under `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = self.create_element(tag);
        for (name, value) in attrs {
            self.set_attribute(id, name, value);
        }
        self.append_child(parent, id);
        id
    }

    /// Append a text node under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.add_node(NodeKind::Text(text.to_string()));
        self.append_child(parent, id);
        id
    }

    /// Append `child_id` as the last child of `parent_id`, detaching it
    /// from any previous parent first.
    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        self.detach(child_id);
        self.nodes[parent_id].children.push(child_id);
        self.nodes[child_id].parent = Some(parent_id);
    }

    /// Detach a node (and its subtree) from its parent. Returns `false`
    /// if the node had no parent.
    pub fn detach(&mut self, node_id: NodeId) -> bool {
        let Some(parent_id) = self.nodes[node_id].parent.take() else {
            return false;
        };
        self.nodes[parent_id].children.retain(|&c| c != node_id);
        true
    }

    /// Whether the node is reachable from the document root.
    pub fn is_attached(&self, node_id: NodeId) -> bool {
        let mut current = Some(node_id);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.nodes[id].parent;
        }
        false
    }

    /// Get a reference to a node by ID.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Get the [`ElementData`] for a node, if it is an `Element`.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.nodes.get(id).map(|n| &n.kind) {
            Some(NodeKind::Element(data)) => Some(data),
            _ => None,
        }
    }

    /// Mutable [`ElementData`] for a node, if it is an `Element`.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match self.nodes.get_mut(id).map(|n| &mut n.kind) {
            Some(NodeKind::Element(data)) => Some(data),
            _ => None,
        }
    }

    /// Set an attribute on an element. Non-element nodes are ignored.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(elem) = self.element_mut(id) {
            elem.set_attribute(name, value);
        }
    }

    /// Add a class to an element. Returns `true` if the class list changed.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        self.element_mut(id).is_some_and(|e| e.add_class(class))
    }

    /// Remove a class from an element. Returns `true` if the class list
    /// changed.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        self.element_mut(id).is_some_and(|e| e.remove_class(class))
    }

    /// Whether an element carries a class.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    /// Find the nearest ancestor that is an element node.
    pub fn parent_element(&self, node_id: NodeId) -> Option<NodeId> {
        let mut current = self.nodes[node_id].parent;
        while let Some(pid) = current {
            if matches!(self.nodes[pid].kind, NodeKind::Element(_)) {
                return Some(pid);
            }
            current = self.nodes[pid].parent;
        }
        None
    }

    /// Get the concatenated text content of a node and all its
    /// descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id].kind {
            NodeKind::Text(s) => out.push_str(s),
            _ => {
                for &child in &self.nodes[id].children {
                    self.collect_text(child, out);
                }
            },
        }
    }

    /// Element descendants of `node_id` in document (pre-)order, not
    /// including `node_id` itself.
    pub fn descendants(&self, node_id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_elements(node_id, &mut out);
        out
    }

    fn collect_elements(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        for &child in &self.nodes[node_id].children {
            if matches!(self.nodes[child].kind, NodeKind::Element(_)) {
                out.push(child);
            }
            self.collect_elements(child, out);
        }
    }

    /// Find the first attached element whose `id` attribute matches
    /// `target`.
    pub fn get_element_by_id(&self, target: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&id| self.element(id).and_then(ElementData::id) == Some(target))
    }

    /// Find the `<body>` element.
    pub fn body(&self) -> Option<NodeId> {
        self.find_first_element(&TagName::Body)
    }

    /// Find the `<title>` text content, if any.
    pub fn title(&self) -> Option<String> {
        let title_id = self.find_first_element(&TagName::Title)?;
        let text = self.text_content(title_id);
        if text.is_empty() { None } else { Some(text) }
    }

    fn find_first_element(&self, tag: &TagName) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&id| self.element(id).is_some_and(|e| e.tag == *tag))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn element_with(doc: &mut Document, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = doc.create_element(tag);
        for (name, value) in attrs {
            doc.set_attribute(id, name, value);
        }
        id
    }

    #[test]
    fn create_document_with_nodes() {
        let mut doc = Document::new();
        assert_eq!(doc.nodes.len(), 1);

        let div_id = doc.create_element("div");
        assert_eq!(div_id, 1);
        doc.append_child(doc.root, div_id);
        assert_eq!(doc.get(doc.root).children, vec![div_id]);
    }

    #[test]
    fn parent_child_links() {
        let mut doc = Document::new();
        let parent = doc.create_element("div");
        let child = doc.create_element("p");
        doc.append_child(doc.root, parent);
        doc.append_child(parent, child);

        assert_eq!(doc.get(child).parent, Some(parent));
        assert_eq!(doc.parent_element(child), Some(parent));
        assert_eq!(doc.parent_element(parent), None);
    }

    #[test]
    fn detach_keeps_slot_but_hides_node() {
        let mut doc = Document::new();
        let body = doc.create_element("body");
        doc.append_child(doc.root, body);
        let div = element_with(&mut doc, "div", &[("id", "gone")]);
        doc.append_child(body, div);
        assert!(doc.is_attached(div));

        assert!(doc.detach(div));
        assert!(!doc.detach(div));
        assert!(!doc.is_attached(div));
        assert!(doc.element(div).is_some());
        assert_eq!(doc.get_element_by_id("gone"), None);
        assert!(doc.get(body).children.is_empty());
    }

    #[test]
    fn append_child_moves_node() {
        let mut doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        let c = doc.create_element("span");
        doc.append_child(doc.root, a);
        doc.append_child(doc.root, b);
        doc.append_child(a, c);
        doc.append_child(b, c);

        assert!(doc.get(a).children.is_empty());
        assert_eq!(doc.get(b).children, vec![c]);
    }

    #[test]
    fn tag_name_roundtrip_and_case() {
        for tag in ["html", "body", "div", "iframe", "video", "dialog"] {
            assert_eq!(TagName::from_str(tag).as_str(), tag);
        }
        assert_eq!(TagName::from_str("VIDEO"), TagName::Video);
        assert_eq!(
            TagName::from_str("x-panel"),
            TagName::Unknown("x-panel".into())
        );
    }

    #[test]
    fn class_list_editing() {
        let mut elem = ElementData::new(TagName::Div);
        assert!(!elem.has_class("is-active"));
        assert!(!elem.remove_class("is-active"));

        assert!(elem.add_class("modal"));
        assert!(elem.add_class("is-active"));
        assert!(!elem.add_class("is-active"));
        assert_eq!(elem.get_attribute("class"), Some("modal is-active"));

        assert!(elem.remove_class("modal"));
        assert_eq!(elem.get_attribute("class"), Some("is-active"));
        assert!(elem.remove_class("is-active"));
        assert_eq!(elem.get_attribute("class"), Some(""));
        assert!(elem.add_class("again"));
        assert_eq!(elem.get_attribute("class"), Some("again"));
    }

    #[test]
    fn data_attributes() {
        let mut elem = ElementData::new(TagName::A);
        elem.set_attribute("data-modal-id", "signup");
        elem.set_attribute("href", "#signup");
        assert_eq!(elem.data("modal-id"), Some("signup"));
        assert_eq!(elem.data("modal"), None);
        elem.set_attribute("data-modal-id", "");
        assert_eq!(elem.data("modal-id"), Some(""));
    }

    #[test]
    fn get_element_by_id_found() {
        let mut doc = Document::new();
        let div = element_with(&mut doc, "div", &[("id", "content")]);
        doc.append_child(doc.root, div);

        assert_eq!(doc.get_element_by_id("content"), Some(div));
        assert_eq!(doc.get_element_by_id("missing"), None);
    }

    #[test]
    fn descendants_in_document_order() {
        let mut doc = Document::new();
        let body = doc.create_element("body");
        let a = doc.create_element("div");
        let a1 = doc.create_element("span");
        let b = doc.create_element("div");
        doc.append_child(doc.root, body);
        doc.append_child(body, a);
        doc.append_child(a, a1);
        doc.append_child(body, b);
        let text = doc.add_node(NodeKind::Text("hi".into()));
        doc.append_child(b, text);

        assert_eq!(doc.descendants(doc.root), vec![body, a, a1, b]);
        assert_eq!(doc.descendants(a), vec![a1]);
    }

    #[test]
    fn body_and_title_lookup() {
        let mut doc = Document::new();
        let html = doc.create_element("html");
        let head = doc.create_element("head");
        let title = doc.create_element("title");
        let body = doc.create_element("body");
        doc.append_child(doc.root, html);
        doc.append_child(html, head);
        doc.append_child(head, title);
        doc.append_child(html, body);
        let text = doc.add_node(NodeKind::Text("My Page".into()));
        doc.append_child(title, text);

        assert_eq!(doc.body(), Some(body));
        assert_eq!(doc.title(), Some("My Page".into()));
    }

    #[test]
    fn title_missing_returns_none() {
        assert_eq!(Document::default().title(), None);
        assert_eq!(Document::with_title("").title(), None);
    }

    #[test]
    fn with_title_builds_skeleton() {
        let mut doc = Document::with_title("Pricing");
        assert_eq!(doc.title(), Some("Pricing".into()));
        let body = doc.body().unwrap();
        let link = doc.append_element(body, "a", &[("id", "open"), ("data-modal-id", "a")]);
        assert_eq!(doc.parent_element(link), Some(body));
        assert_eq!(doc.get_element_by_id("open"), Some(link));
    }

    #[test]
    fn class_helpers_ignore_non_elements() {
        let mut doc = Document::new();
        let text = doc.add_node(NodeKind::Text("x".into()));
        assert!(!doc.add_class(text, "a"));
        assert!(!doc.has_class(text, "a"));
        assert!(!doc.remove_class(text, "a"));
        assert!(!doc.add_class(99, "a"));
    }
}
