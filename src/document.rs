use tl::{HTMLVersion, Node, NodeHandle, Parser, ParserOptions, VDom, VDomGuard};

use crate::{
    errors::{Error, Origin, Result},
    find::{self, Root},
    matcher::Matcher,
};

/// A parsed HTML document
///
/// Owns both the input and the tree built from it. Nodes are addressed through [`NodeHandle`]s,
/// which are resolved with `handle.get(document.parser())`.
///
/// # Example
/// ```
/// let doc = restify::load_buffer(br#"<div id="a"><p class="x y">t</p></div>"#).unwrap();
///
/// let div = doc.find_by_id("a").unwrap();
/// assert_eq!(doc.find_all_by_class("y").len(), 1);
/// assert_eq!(doc.find_all_by_tag_name("p").len(), 1);
///
/// let tag = doc.get(div).and_then(|node| node.as_tag()).unwrap();
/// assert_eq!(tag.name().as_utf8_str(), "div");
/// ```
#[derive(Debug)]
pub struct Document {
    guard: VDomGuard,
}

impl Document {
    /// Parses the given input string
    pub fn parse(input: String, options: ParserOptions) -> Result<Self> {
        Self::parse_from(input, options, Origin::Buffer)
    }

    /// Parses the given bytes
    ///
    /// The input is expected to be UTF-8. Invalid sequences are replaced
    /// with `U+FFFD REPLACEMENT CHARACTER` instead of failing the whole document.
    pub fn from_bytes(bytes: &[u8], options: ParserOptions) -> Result<Self> {
        Self::parse_bytes(bytes.to_vec(), options, Origin::Buffer)
    }

    pub(crate) fn parse_bytes(bytes: Vec<u8>, options: ParserOptions, origin: Origin) -> Result<Self> {
        let input = match String::from_utf8(bytes) {
            Ok(input) => input,
            Err(err) => {
                log::debug!("{} is not valid UTF-8, replacing invalid sequences", origin);
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };

        Self::parse_from(input, options, origin)
    }

    pub(crate) fn parse_from(input: String, options: ParserOptions, origin: Origin) -> Result<Self> {
        log::debug!("parsing {} ({} bytes)", origin, input.len());

        // SAFETY: the guard owns the input for as long as the tree borrows from it,
        // and the tree is only ever handed out behind a borrow of `self`
        let guard = unsafe { tl::parse_owned(input, options) }
            .map_err(|source| Error::parse(origin, source))?;

        Ok(Self { guard })
    }

    /// Returns a reference to the parsed tree
    #[inline]
    pub fn dom(&self) -> &VDom<'_> {
        self.guard.get_ref()
    }

    /// Returns a reference to the underlying parser, needed to resolve [`NodeHandle`]s
    #[inline]
    pub fn parser(&self) -> &Parser<'_> {
        self.dom().parser()
    }

    /// Returns every node of the document, in document order
    ///
    /// The index of a node in this slice is the id of its [`NodeHandle`].
    #[inline]
    pub fn nodes(&self) -> &[Node<'_>] {
        self.dom().nodes()
    }

    /// Returns the top-level nodes of the document
    #[inline]
    pub fn children(&self) -> &[NodeHandle] {
        self.dom().children()
    }

    /// Returns the total number of nodes
    pub fn len(&self) -> usize {
        self.nodes().len()
    }

    /// Returns whether the document has no nodes at all
    pub fn is_empty(&self) -> bool {
        self.nodes().is_empty()
    }

    /// Resolves a handle to the node it points to
    pub fn get(&self, handle: NodeHandle) -> Option<&Node<'_>> {
        handle.get(self.parser())
    }

    /// Returns the HTML version declared by the `<!DOCTYPE>`, if any
    pub fn version(&self) -> Option<HTMLVersion> {
        self.dom().version()
    }

    /// Returns the first node (in document order) that satisfies `matcher`
    pub fn find<M: Matcher>(&self, matcher: M) -> Option<NodeHandle> {
        find::find(self.dom(), Root::Document, matcher)
    }

    /// Returns every node that satisfies `matcher`, in document order
    pub fn find_all<M: Matcher>(&self, matcher: M) -> Vec<NodeHandle> {
        find::find_all(self.dom(), Root::Document, matcher)
    }

    /// Finds the first element whose `id` attribute is `id`
    pub fn find_by_id(&self, id: &str) -> Option<NodeHandle> {
        find::find_by_id(self.dom(), Root::Document, id)
    }

    /// Finds every element that carries `class_name` in its `class` attribute
    pub fn find_all_by_class(&self, class_name: &str) -> Vec<NodeHandle> {
        find::find_all_by_class(self.dom(), Root::Document, class_name)
    }

    /// Finds every element that has the attribute `name`, whatever its value
    pub fn find_all_by_attribute_name(&self, name: &str) -> Vec<NodeHandle> {
        find::find_all_by_attribute_name(self.dom(), Root::Document, name)
    }

    /// Finds every element whose attribute `name` equals `value`, or any value if `value` is empty
    pub fn find_all_by_attribute_name_value(&self, name: &str, value: &str) -> Vec<NodeHandle> {
        find::find_all_by_attribute_name_value(self.dom(), Root::Document, name, value)
    }

    /// Finds every element that has the attribute `name` with exactly `value`, if given
    pub fn find_all_by_attribute(&self, name: &str, value: Option<&str>) -> Vec<NodeHandle> {
        find::find_all_by_attribute(self.dom(), Root::Document, name, value)
    }

    /// Finds every element with the given tag name
    pub fn find_all_by_tag_name(&self, tag_name: &str) -> Vec<NodeHandle> {
        find::find_all_by_tag_name(self.dom(), Root::Document, tag_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_utf8_is_replaced() {
        let doc = Document::from_bytes(b"<p id=\"a\">caf\xe9</p>", ParserOptions::default()).unwrap();
        let p = doc.find_by_id("a").unwrap();

        assert_eq!(doc.get(p).unwrap().inner_text(doc.parser()), "caf\u{fffd}");
    }

    #[test]
    fn empty_input() {
        let doc = Document::parse(String::new(), ParserOptions::default()).unwrap();

        assert!(doc.is_empty());
        assert!(doc.children().is_empty());
        assert!(doc.find_by_id("a").is_none());
        assert!(doc.find_all_by_tag_name("p").is_empty());
    }

    #[test]
    fn first_of_duplicate_ids_wins() {
        let html = r#"<div><span id="x"></span><b id="x"></b></div>"#;
        let doc = Document::parse(html.into(), ParserOptions::default()).unwrap();

        let found = doc.find_by_id("x").unwrap();
        let tag = doc.get(found).and_then(|node| node.as_tag()).unwrap();
        assert_eq!(tag.name().as_utf8_str(), "span");
    }

    #[test]
    fn doctype_version() {
        let doc = Document::parse("<!DOCTYPE html><p>x</p>".into(), ParserOptions::default()).unwrap();

        assert_eq!(doc.version(), Some(HTMLVersion::HTML5));
    }

    #[test]
    fn document_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Document>();
    }
}
