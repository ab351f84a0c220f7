use std::{borrow::Cow, ops::Range};

use tl::{Node, NodeHandle, VDom};

use crate::matcher::{self, ByAttribute, ByClass, ById, ByTag, Matcher};

/// The node a lookup starts from
///
/// Lookups visit the starting node first, followed by all of its descendants in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Root {
    /// Every node of the document
    #[default]
    Document,
    /// The given node and its subtree
    Node(NodeHandle),
}

impl From<NodeHandle> for Root {
    fn from(handle: NodeHandle) -> Self {
        Root::Node(handle)
    }
}

impl Root {
    /// Returns the range of node ids covered by this root
    ///
    /// tl stores nodes in document order and keeps every subtree contiguous,
    /// so a subtree is the node itself followed by the span of its children.
    fn span(&self, dom: &VDom<'_>) -> Range<usize> {
        let parser = dom.parser();

        match *self {
            Root::Document => 0..dom.nodes().len(),
            Root::Node(handle) => {
                let node = match handle.get(parser) {
                    Some(node) => node,
                    None => return 0..0,
                };

                let start = handle.get_inner() as usize;
                let end = node
                    .as_tag()
                    .and_then(|tag| tag.children().boundaries(parser))
                    .map_or(start, |(_, end)| end as usize);

                start..end + 1
            }
        }
    }
}

/// An iterator over the nodes below a [`Root`] that satisfy a [`Matcher`]
///
/// Yields handles in document order.
#[derive(Debug)]
pub struct FindIter<'a, 'b, M> {
    matcher: M,
    dom: &'b VDom<'a>,
    span: Range<usize>,
}

impl<'a, 'b, M: Matcher> FindIter<'a, 'b, M> {
    /// Creates a new iterator
    pub fn new(dom: &'b VDom<'a>, root: Root, matcher: M) -> Self {
        let span = root.span(dom);
        Self { matcher, dom, span }
    }
}

impl<'a, 'b, M: Matcher> Iterator for FindIter<'a, 'b, M> {
    type Item = NodeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.dom.nodes();

        for idx in self.span.by_ref() {
            let node = nodes.get(idx)?;

            if self.matcher.matches(node) {
                return Some(NodeHandle::new(idx as u32));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.span.len()))
    }
}

/// Returns an iterator over every node below `root` that satisfies `matcher`
pub fn iter<'a, 'b, M: Matcher>(
    dom: &'b VDom<'a>,
    root: impl Into<Root>,
    matcher: M,
) -> FindIter<'a, 'b, M> {
    FindIter::new(dom, root.into(), matcher)
}

/// Returns the first node below `root` (in document order) that satisfies `matcher`
pub fn find<M: Matcher>(dom: &VDom<'_>, root: impl Into<Root>, matcher: M) -> Option<NodeHandle> {
    iter(dom, root, matcher).next()
}

/// Returns every node below `root` that satisfies `matcher`, in document order
pub fn find_all<M: Matcher>(dom: &VDom<'_>, root: impl Into<Root>, matcher: M) -> Vec<NodeHandle> {
    let found: Vec<_> = iter(dom, root, matcher).collect();
    log::trace!("lookup matched {} node(s)", found.len());
    found
}

/// Finds the first element whose `id` attribute is `id`
///
/// # Example
/// ```
/// let doc = restify::load_buffer(br#"<div id="a"><p class="x y">t</p></div>"#).unwrap();
/// let div = restify::find_by_id(doc.dom(), restify::Root::Document, "a").unwrap();
///
/// let tag = div.get(doc.parser()).and_then(|node| node.as_tag()).unwrap();
/// assert_eq!(tag.name().as_utf8_str(), "div");
/// ```
pub fn find_by_id(dom: &VDom<'_>, root: impl Into<Root>, id: &str) -> Option<NodeHandle> {
    find(dom, root, ById(id))
}

/// Finds every element that carries `class_name` in its `class` attribute
pub fn find_all_by_class(
    dom: &VDom<'_>,
    root: impl Into<Root>,
    class_name: &str,
) -> Vec<NodeHandle> {
    find_all(dom, root, ByClass(class_name))
}

/// Finds every element that has the attribute `name`, whatever its value
pub fn find_all_by_attribute_name(
    dom: &VDom<'_>,
    root: impl Into<Root>,
    name: &str,
) -> Vec<NodeHandle> {
    find_all(dom, root, ByAttribute::present(name))
}

/// Finds every element whose attribute `name` equals `value`
///
/// An empty `value` means "any value", which makes this the same lookup as
/// [`find_all_by_attribute_name`]. Use [`find_all_by_attribute`] to search for
/// attributes that are actually empty.
pub fn find_all_by_attribute_name_value(
    dom: &VDom<'_>,
    root: impl Into<Root>,
    name: &str,
    value: &str,
) -> Vec<NodeHandle> {
    let value = Some(value).filter(|value| !value.is_empty());
    find_all_by_attribute(dom, root, name, value)
}

/// Finds every element that has the attribute `name` and, if `value` is given,
/// whose attribute value is exactly `value`
pub fn find_all_by_attribute(
    dom: &VDom<'_>,
    root: impl Into<Root>,
    name: &str,
    value: Option<&str>,
) -> Vec<NodeHandle> {
    find_all(dom, root, ByAttribute::new(name, value))
}

/// Finds every element with the given tag name
///
/// Tag names are compared case-insensitively. Names outside of the HTML vocabulary
/// (see [`tags`](crate::tags)) never match.
pub fn find_all_by_tag_name(
    dom: &VDom<'_>,
    root: impl Into<Root>,
    tag_name: &str,
) -> Vec<NodeHandle> {
    let matcher = ByTag::new(tag_name);
    if matcher.name().is_none() {
        log::trace!("`{}` is not a known HTML tag", tag_name);
        return Vec::new();
    }

    find_all(dom, root, matcher)
}

/// Returns the value of the attribute `name` of an element
///
/// Attributes written without a value (`<input disabled>`) read as an empty string.
/// Returns `None` for missing attributes and for text or comment nodes.
pub fn attr<'n>(node: &'n Node<'_>, name: &str) -> Option<Cow<'n, str>> {
    let value = matcher::attribute(node.as_tag()?, name)?;
    Some(value.unwrap_or(Cow::Borrowed("")))
}
