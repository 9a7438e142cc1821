//! Outline tree model and OPML parsing
//!
//! Pure functions that turn the text of a mind-map OPML export into an
//! in-memory [`OutlineDocument`]. Reading the file from disk is left to the
//! binary crate.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// OPML attribute holding a node's label
pub const LABEL_ATTR: &str = "text";
/// OPML attribute holding a node's annotation
pub const ANNOTATION_ATTR: &str = "_note";
/// OPML attribute holding a node's raw image-reference payload
pub const IMAGES_ATTR: &str = "_mubu_images";

/// A required node is missing from the outline document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("malformed outline document: missing `{0}` node")]
    MissingNode(&'static str),
}

/// Errors produced while parsing an OPML document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutlineError {
    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error("XML parsing error: {0}")]
    Xml(String),
}

impl From<quick_xml::Error> for OutlineError {
    fn from(err: quick_xml::Error) -> Self {
        OutlineError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for OutlineError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        OutlineError::Xml(err.to_string())
    }
}

/// A single node of the outline tree.
///
/// Missing attributes read as empty strings, so "has an annotation" and
/// "has images" are emptiness checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineNode {
    pub label: String,
    pub annotation: String,
    pub image_payload: String,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = annotation.into();
        self
    }

    pub fn with_images(mut self, image_payload: impl Into<String>) -> Self {
        self.image_payload = image_payload.into();
        self
    }

    pub fn with_children(mut self, children: Vec<OutlineNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn has_annotation(&self) -> bool {
        !self.annotation.is_empty()
    }

    pub fn has_images(&self) -> bool {
        !self.image_payload.is_empty()
    }
}

/// A parsed OPML export
///
/// `body` holds the `<body>` element as a node with an empty label. Its
/// children are the top-level `<outline>` elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineDocument {
    pub title: String,
    pub body: Option<OutlineNode>,
}

impl OutlineDocument {
    /// The first top-level outline node, if any
    pub fn outline_root(&self) -> Option<&OutlineNode> {
        self.body.as_ref().and_then(|body| body.children.first())
    }
}

/// Build an [`OutlineNode`] from the attributes of an `<outline>` element
fn node_from_element(element: &BytesStart) -> Result<OutlineNode, OutlineError> {
    let mut node = OutlineNode::default();

    for attr in element.attributes() {
        let attr = attr?;
        let key = attr.key.as_ref();
        if key == LABEL_ATTR.as_bytes() {
            node.label = attr.unescape_value()?.into_owned();
        } else if key == ANNOTATION_ATTR.as_bytes() {
            node.annotation = attr.unescape_value()?.into_owned();
        } else if key == IMAGES_ATTR.as_bytes() {
            node.image_payload = attr.unescape_value()?.into_owned();
        }
    }

    Ok(node)
}

/// Attach a finished outline node to the innermost open outline, or to the body.
fn attach(stack: &mut [OutlineNode], body: &mut Option<OutlineNode>, node: OutlineNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if let Some(body) = body.as_mut() {
        body.children.push(node);
    }
}

/// Parse the text of an OPML document into an [`OutlineDocument`].
///
/// The `<opml>` root element and a `<head><title>` element are required.
/// A missing `<body>` is not an error here; [`crate::root::select_root`]
/// reports it when a traversal root is requested.
///
/// Only the first title is used, and its text is kept exactly as written.
///
/// Only `<outline>` elements nested directly under `<body>` or another
/// `<outline>` become tree nodes.
pub fn parse_opml(xml: &str) -> Result<OutlineDocument, OutlineError> {
    // Text is kept untrimmed so the title compares exactly with outline labels.
    let mut reader = Reader::from_str(xml);

    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut saw_opml = false;
    let mut title: Option<String> = None;
    let mut in_title = false;
    let mut body: Option<OutlineNode> = None;
    let mut stack: Vec<OutlineNode> = Vec::new();

    let in_outline_scope = |path: &[Vec<u8>]| {
        path.len() >= 2
            && path[0] == b"opml"
            && path[1] == b"body"
            && path[2..].iter().all(|name| name == b"outline")
    };

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                match name.as_slice() {
                    b"opml" if path.is_empty() => saw_opml = true,
                    b"title" if path.len() == 2 && path[1] == b"head" && title.is_none() => {
                        in_title = true;
                        title = Some(String::new());
                    }
                    b"body" if path.len() == 1 && saw_opml && body.is_none() => {
                        body = Some(OutlineNode::default());
                    }
                    b"outline" if in_outline_scope(&path) => {
                        stack.push(node_from_element(&e)?);
                    }
                    _ => {}
                }
                path.push(name);
            }
            Event::Empty(e) => match e.name().as_ref() {
                b"outline" if in_outline_scope(&path) => {
                    let node = node_from_element(&e)?;
                    attach(&mut stack, &mut body, node);
                }
                b"title" if path.len() == 2 && path[1] == b"head" && title.is_none() => {
                    title = Some(String::new());
                }
                b"body" if path.len() == 1 && saw_opml && body.is_none() => {
                    body = Some(OutlineNode::default());
                }
                _ => {}
            },
            Event::End(e) => {
                if e.name().as_ref() == b"outline" {
                    path.pop();
                    if in_outline_scope(&path) {
                        if let Some(node) = stack.pop() {
                            attach(&mut stack, &mut body, node);
                        }
                    }
                    continue;
                }
                if e.name().as_ref() == b"title" {
                    in_title = false;
                }
                path.pop();
            }
            Event::Text(e) => {
                if in_title {
                    let text = e.unescape()?;
                    if let Some(title) = title.as_mut() {
                        title.push_str(&text);
                    }
                }
            }
            Event::CData(e) => {
                if in_title {
                    if let Some(title) = title.as_mut() {
                        title.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_opml {
        return Err(StructureError::MissingNode("opml").into());
    }
    let title = title.ok_or(StructureError::MissingNode("title"))?;

    Ok(OutlineDocument { title, body })
}
