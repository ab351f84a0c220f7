//! The vocabulary of recognized HTML element names

/// Every recognized HTML element name, lower-case and sorted so it can be binary searched.
///
/// Covers the current HTML standard plus the obsolete elements browsers still parse
/// (`center`, `font`, `marquee`, ...) and the SVG/MathML roots.
pub const KNOWN_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "address", "applet", "area", "article", "aside", "audio", "b",
    "base", "basefont", "bdi", "bdo", "bgsound", "big", "blink", "blockquote", "body", "br",
    "button", "canvas", "caption", "center", "cite", "code", "col", "colgroup", "command",
    "data", "datalist", "dd", "del", "details", "dfn", "dialog", "dir", "div", "dl", "dt",
    "em", "embed", "fieldset", "figcaption", "figure", "font", "footer", "form", "frame",
    "frameset", "h1", "h2", "h3", "h4", "h5", "h6", "head", "header", "hgroup", "hr", "html",
    "i", "iframe", "image", "img", "input", "ins", "isindex", "kbd", "keygen", "label",
    "legend", "li", "link", "listing", "main", "malignmark", "map", "mark", "marquee", "math",
    "menu", "menuitem", "meta", "meter", "mglyph", "mi", "mn", "mo", "ms", "mtext", "nav",
    "nobr", "noembed", "noframes", "noscript", "object", "ol", "optgroup", "option", "output",
    "p", "param", "picture", "plaintext", "pre", "progress", "q", "rb", "rp", "rt", "rtc",
    "ruby", "s", "samp", "script", "search", "section", "select", "slot", "small", "source",
    "spacer", "span", "strike", "strong", "style", "sub", "summary", "sup", "svg", "table",
    "tbody", "td", "template", "textarea", "tfoot", "th", "thead", "time", "title", "tr",
    "track", "tt", "u", "ul", "var", "video", "wbr", "xmp",
];

/// Returns the canonical (lower-case) name of a recognized HTML element
///
/// The lookup is ASCII case-insensitive. Custom elements and misspelled names are not recognized.
///
/// # Example
/// ```
/// assert_eq!(restify::tags::lookup("DIV"), Some("div"));
/// assert_eq!(restify::tags::lookup("my-widget"), None);
/// ```
pub fn lookup(name: &str) -> Option<&'static str> {
    // the longest known name is "malignmark", anything longer can be rejected without allocating
    if name.is_empty() || name.len() > 10 {
        return None;
    }

    let lower = name.to_ascii_lowercase();
    KNOWN_TAGS
        .binary_search(&lower.as_str())
        .ok()
        .map(|idx| KNOWN_TAGS[idx])
}

/// Returns whether the given name is a recognized HTML element
#[inline]
pub fn is_known(name: &str) -> bool {
    lookup(name).is_some()
}
