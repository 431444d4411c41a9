// WHY: quick-xml is a pull parser; the accessor needs random access to header,
// identifier and body, so events are folded into a small owned element arena

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use std::fmt;

use crate::error::RmhError;

/// Index of a node inside an [`XmlTree`] arena
pub type NodeId = usize;

/// Namespace the `xml:` prefix is permanently bound to
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

#[derive(Debug)]
struct Node {
    namespace: Option<String>,
    local_name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
}

/// Read-only element tree built from a single XML document
#[derive(Debug)]
pub struct XmlTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl XmlTree {
    /// Parse a complete document into an element tree
    ///
    /// Comments, processing instructions and the XML declaration are dropped.
    /// Element names are namespace-resolved; text is kept verbatim (no trimming).
    pub fn parse(input: &str) -> Result<Self, RmhError> {
        let mut reader = NsReader::from_str(input);
        let mut nodes: Vec<Node> = Vec::new();
        let mut open: Vec<NodeId> = Vec::new();
        let mut root: Option<NodeId> = None;

        loop {
            let (resolved, event) = reader.read_resolved_event()?;
            let namespace = owned_namespace(resolved)?;
            match event {
                Event::Start(start) => {
                    let id = push_element(&reader, &mut nodes, &open, &mut root, namespace, &start)?;
                    open.push(id);
                }
                Event::Empty(start) => {
                    push_element(&reader, &mut nodes, &open, &mut root, namespace, &start)?;
                }
                Event::End(_) => {
                    if open.pop().is_none() {
                        return Err(RmhError::Malformed("closing tag without matching opening tag".into()));
                    }
                }
                Event::Text(text) => {
                    let text = text.unescape()?;
                    append_text(&mut nodes, &open, &text)?;
                }
                Event::CData(cdata) => {
                    let text = std::str::from_utf8(&cdata)
                        .map_err(|e| RmhError::Malformed(format!("CDATA is not valid UTF-8: {e}")))?;
                    append_text(&mut nodes, &open, text)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(&unclosed) = open.last() {
            return Err(RmhError::Malformed(format!(
                "unexpected end of input inside <{}>",
                nodes[unclosed].local_name
            )));
        }
        let root = root.ok_or_else(|| RmhError::Malformed("document has no root element".into()))?;
        Ok(Self { nodes, root })
    }

    /// Root element of the document
    pub fn root(&self) -> Element<'_> {
        Element { tree: self, id: self.root }
    }

    /// Number of elements in the tree
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Handle for a node id previously taken from this tree
    pub(crate) fn element(&self, id: NodeId) -> Element<'_> {
        Element { tree: self, id }
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }
}

fn owned_namespace(resolved: ResolveResult) -> Result<Option<String>, RmhError> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(Some(utf8(ns.as_ref())?)),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(RmhError::Malformed(format!(
            "unbound namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

fn utf8(bytes: &[u8]) -> Result<String, RmhError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| RmhError::Malformed(format!("name is not valid UTF-8: {e}")))
}

fn push_element(
    reader: &NsReader<&[u8]>,
    nodes: &mut Vec<Node>,
    open: &[NodeId],
    root: &mut Option<NodeId>,
    namespace: Option<String>,
    start: &BytesStart,
) -> Result<NodeId, RmhError> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        // xmlns declarations are consumed by the resolver, not kept as data
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = match reader.resolve_attribute(attr.key) {
            (ResolveResult::Bound(ns), local) => {
                format!("{{{}}}{}", utf8(ns.as_ref())?, utf8(local.as_ref())?)
            }
            (ResolveResult::Unbound, local) => utf8(local.as_ref())?,
            (ResolveResult::Unknown(prefix), local) if prefix == b"xml" => {
                format!("{{{XML_NS}}}{}", utf8(local.as_ref())?)
            }
            (ResolveResult::Unknown(prefix), _) => {
                return Err(RmhError::Malformed(format!(
                    "unbound attribute prefix '{}'",
                    String::from_utf8_lossy(&prefix)
                )))
            }
        };
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }

    let id = nodes.len();
    nodes.push(Node {
        namespace,
        local_name: utf8(start.local_name().as_ref())?,
        attributes,
        text: None,
        children: Vec::new(),
    });

    match open.last() {
        Some(&parent) => nodes[parent].children.push(id),
        None if root.is_none() => *root = Some(id),
        None => return Err(RmhError::Malformed("more than one root element".into())),
    }
    Ok(id)
}

/// Text only counts while the current element has no children yet
fn append_text(nodes: &mut [Node], open: &[NodeId], text: &str) -> Result<(), RmhError> {
    let Some(&current) = open.last() else {
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(RmhError::Malformed("character data outside the root element".into()));
    };
    let node = &mut nodes[current];
    if node.children.is_empty() && !text.is_empty() {
        node.text.get_or_insert_with(String::new).push_str(text);
    }
    Ok(())
}

/// Borrowed handle to one element of an [`XmlTree`]
#[derive(Clone, Copy)]
pub struct Element<'a> {
    tree: &'a XmlTree,
    id: NodeId,
}

impl<'a> Element<'a> {
    pub fn id(self) -> NodeId {
        self.id
    }

    /// Namespace URI, if the element is in one
    pub fn namespace(self) -> Option<&'a str> {
        self.tree.node(self.id).namespace.as_deref()
    }

    pub fn local_name(self) -> &'a str {
        &self.tree.node(self.id).local_name
    }

    /// Name in Clark notation, `{uri}local` or bare `local`
    pub fn tag(self) -> String {
        match self.namespace() {
            Some(ns) => format!("{{{ns}}}{}", self.local_name()),
            None => self.local_name().to_string(),
        }
    }

    /// True if the element has the given namespace URI and local name
    pub fn is(self, namespace: &str, local_name: &str) -> bool {
        self.namespace() == Some(namespace) && self.local_name() == local_name
    }

    /// Attribute value by key; prefixed attributes use Clark notation
    pub fn attr(self, key: &str) -> Option<&'a str> {
        self.tree
            .node(self.id)
            .attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Character data before the first child element
    pub fn text(self) -> Option<&'a str> {
        self.tree.node(self.id).text.as_deref()
    }

    pub fn children(self) -> Children<'a> {
        Children {
            tree: self.tree,
            ids: self.tree.node(self.id).children.iter(),
        }
    }

    /// Direct children with the given name, in document order
    pub fn children_named(self, namespace: &'a str, local_name: &'a str) -> impl Iterator<Item = Element<'a>> + 'a {
        self.children().filter(move |child| child.is(namespace, local_name))
    }

    /// First direct child with the given name
    pub fn find(self, namespace: &str, local_name: &str) -> Option<Element<'a>> {
        self.children().find(|child| child.is(namespace, local_name))
    }

    /// All elements below this one in document order, excluding itself
    pub fn descendants(self) -> Descendants<'a> {
        let mut stack: Vec<NodeId> = self.tree.node(self.id).children.clone();
        stack.reverse();
        Descendants { tree: self.tree, stack }
    }

    /// This element followed by its descendants in document order
    pub fn iter(self) -> impl Iterator<Item = Element<'a>> + 'a {
        std::iter::once(self).chain(self.descendants())
    }
}

impl PartialEq for Element<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Element<'_> {}

impl fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("tag", &self.tag())
            .finish()
    }
}

/// Iterator over the direct children of an element
pub struct Children<'a> {
    tree: &'a XmlTree,
    ids: std::slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = *self.ids.next()?;
        Some(Element { tree: self.tree, id })
    }
}

/// Pre-order iterator over the descendants of an element
pub struct Descendants<'a> {
    tree: &'a XmlTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.stack.extend(self.tree.node(current).children.iter().rev());
        Some(Element { tree: self.tree, id: current })
    }
}
