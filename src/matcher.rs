use std::borrow::Cow;

use tl::{HTMLTag, Node};

use crate::tags;

/// Decides whether a node satisfies a search criterion
///
/// Any `Fn(&Node) -> bool` is a matcher, so ad-hoc predicates can be passed
/// to [`find`](crate::find) and [`find_all`](crate::find_all) directly:
/// ```
/// fn is_comment(node: &tl::Node<'_>) -> bool {
///     matches!(node, tl::Node::Comment(_))
/// }
///
/// let doc = restify::load_buffer(b"<ul><!-- a --><li>a</li><!-- b --></ul>").unwrap();
/// assert_eq!(doc.find_all(is_comment).len(), 2);
/// ```
pub trait Matcher {
    /// Returns true if `node` should be part of the result
    fn matches(&self, node: &Node<'_>) -> bool;
}

impl<F> Matcher for F
where
    F: Fn(&Node<'_>) -> bool,
{
    #[inline]
    fn matches(&self, node: &Node<'_>) -> bool {
        self(node)
    }
}

/// Reads the attribute `name` of an element.
///
/// The outer option is `None` if the attribute is absent, the inner one is `None` for
/// attributes written without a value (`<input disabled>`).
/// Attribute names are compared ASCII case-insensitively, like browsers do.
pub(crate) fn attribute<'n>(tag: &'n HTMLTag<'_>, name: &str) -> Option<Option<Cow<'n, str>>> {
    let attributes = tag.attributes();

    // `id` and `class` are stored outside of the raw attribute table
    let special = if name.eq_ignore_ascii_case("id") {
        attributes.id()
    } else if name.eq_ignore_ascii_case("class") {
        attributes.class()
    } else {
        None
    };

    if let Some(value) = special {
        return Some(Some(value.as_utf8_str()));
    }

    attributes
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
}

/// Matches the element whose `id` attribute equals the given value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ById<'s>(pub &'s str);

impl Matcher for ById<'_> {
    fn matches(&self, node: &Node<'_>) -> bool {
        node.as_tag()
            .and_then(|tag| attribute(tag, "id"))
            .flatten()
            .map_or(false, |id| id == self.0)
    }
}

/// Matches elements whose `class` attribute contains the given class name
///
/// The `class` attribute is treated as a whitespace separated set of tokens,
/// so `ByClass("btn")` matches `class="btn large"` but not `class="btn-primary"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByClass<'s>(pub &'s str);

impl Matcher for ByClass<'_> {
    fn matches(&self, node: &Node<'_>) -> bool {
        node.as_tag()
            .and_then(|tag| attribute(tag, "class"))
            .flatten()
            .map_or(false, |class| {
                class
                    .split_ascii_whitespace()
                    .any(|token| token == self.0)
            })
    }
}

/// Matches elements with a given tag name
///
/// The name is resolved against the HTML tag vocabulary (see [`tags`]) when the matcher is built.
/// Unknown names never match anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByTag {
    name: Option<&'static str>,
}

impl ByTag {
    /// Creates a new tag matcher
    pub fn new(name: &str) -> Self {
        Self {
            name: tags::lookup(name),
        }
    }

    /// Returns the canonical tag name, or `None` if the name was not recognized
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }
}

impl Matcher for ByTag {
    fn matches(&self, node: &Node<'_>) -> bool {
        let (name, tag) = match (self.name, node.as_tag()) {
            (Some(name), Some(tag)) => (name, tag),
            _ => return false,
        };

        // tl keeps the slash of a self-closing tag written without a space (`<br/>`) in its name
        let raw = tag.name().as_utf8_str();
        let raw = raw.strip_suffix('/').unwrap_or(&raw);
        raw.eq_ignore_ascii_case(name)
    }
}

/// Matches elements by attribute presence, or by attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByAttribute<'s> {
    name: &'s str,
    value: Option<&'s str>,
}

impl<'s> ByAttribute<'s> {
    /// Creates a new attribute matcher
    ///
    /// With `value: None`, any element carrying the attribute matches, whatever its value.
    /// With `Some(value)`, the attribute value must be equal to `value`. In particular
    /// `Some("")` only matches attributes that are empty or written without a value.
    pub fn new(name: &'s str, value: Option<&'s str>) -> Self {
        Self { name, value }
    }

    /// Matches elements that have the attribute, regardless of its value
    pub fn present(name: &'s str) -> Self {
        Self::new(name, None)
    }

    /// Matches elements whose attribute equals `value`
    pub fn value(name: &'s str, value: &'s str) -> Self {
        Self::new(name, Some(value))
    }
}

impl Matcher for ByAttribute<'_> {
    fn matches(&self, node: &Node<'_>) -> bool {
        let found = match node.as_tag().and_then(|tag| attribute(tag, self.name)) {
            Some(found) => found,
            None => return false,
        };

        match self.value {
            None => true,
            Some(expected) => found.as_deref().unwrap_or("") == expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_tag<'a, 'b>(dom: &'a tl::VDom<'b>) -> &'a Node<'b> {
        dom.nodes()
            .iter()
            .find(|node| node.as_tag().is_some())
            .expect("no element in input")
    }

    #[test]
    fn by_id() {
        let dom = tl::parse(r#"<p id="intro">x</p>"#, Default::default()).unwrap();
        let node = first_tag(&dom);

        assert!(ById("intro").matches(node));
        assert!(!ById("intr").matches(node));
        assert!(!ById("").matches(node));
    }

    #[test]
    fn by_class_matches_whole_tokens() {
        let dom = tl::parse(r#"<a class="btn-primary  large">x</a>"#, Default::default()).unwrap();
        let node = first_tag(&dom);

        assert!(ByClass("btn-primary").matches(node));
        assert!(ByClass("large").matches(node));
        assert!(!ByClass("btn").matches(node));
        assert!(!ByClass("").matches(node));
    }

    #[test]
    fn by_tag_ignores_case() {
        let dom = tl::parse("<DIV>x</DIV>", Default::default()).unwrap();
        let node = first_tag(&dom);

        assert!(ByTag::new("div").matches(node));
        assert!(ByTag::new("Div").matches(node));
        assert!(!ByTag::new("span").matches(node));
    }

    #[test]
    fn by_tag_self_closing_without_space() {
        let dom = tl::parse("<br/>", Default::default()).unwrap();
        let node = first_tag(&dom);

        assert!(ByTag::new("br").matches(node));
        assert!(!ByTag::new("b").matches(node));
    }

    #[test]
    fn by_tag_unknown_name_matches_nothing() {
        let dom = tl::parse("<my-widget>x</my-widget>", Default::default()).unwrap();
        let node = first_tag(&dom);

        let matcher = ByTag::new("my-widget");
        assert_eq!(matcher.name(), None);
        assert!(!matcher.matches(node));
    }

    #[test]
    fn by_attribute_presence_and_value() {
        let dom = tl::parse(r#"<input data-x="" type="text">"#, Default::default()).unwrap();
        let node = first_tag(&dom);

        assert!(ByAttribute::present("data-x").matches(node));
        assert!(ByAttribute::present("TYPE").matches(node));
        assert!(ByAttribute::value("data-x", "").matches(node));
        assert!(ByAttribute::value("type", "text").matches(node));
        assert!(!ByAttribute::value("type", "Text").matches(node));
        assert!(!ByAttribute::present("name").matches(node));
    }

    #[test]
    fn text_nodes_never_match() {
        let dom = tl::parse("just text", Default::default()).unwrap();
        let node = &dom.nodes()[0];

        assert!(node.as_tag().is_none());
        assert!(!ByAttribute::present("id").matches(node));
        assert!(!ByTag::new("p").matches(node));
        assert!(!ByClass("x").matches(node));
    }

    fn is_element(node: &Node<'_>) -> bool {
        node.as_tag().is_some()
    }

    #[test]
    fn functions_are_matchers() {
        let dom = tl::parse("<br>", Default::default()).unwrap();

        assert!(is_element.matches(first_tag(&dom)));
    }
}
