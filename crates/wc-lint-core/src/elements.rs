//! Knowledge about HTML elements: built-in element classes and custom
//! element name validation.

/// Built-in HTML tags and the interface each one is an instance of.
pub const BUILTIN_TAG_CLASSES: &[(&str, &str)] = &[
    ("a", "HTMLAnchorElement"),
    ("abbr", "HTMLElement"),
    ("address", "HTMLElement"),
    ("area", "HTMLAreaElement"),
    ("article", "HTMLElement"),
    ("aside", "HTMLElement"),
    ("audio", "HTMLAudioElement"),
    ("b", "HTMLElement"),
    ("base", "HTMLBaseElement"),
    ("bdi", "HTMLElement"),
    ("bdo", "HTMLElement"),
    ("blockquote", "HTMLQuoteElement"),
    ("body", "HTMLBodyElement"),
    ("br", "HTMLBRElement"),
    ("button", "HTMLButtonElement"),
    ("canvas", "HTMLCanvasElement"),
    ("caption", "HTMLTableCaptionElement"),
    ("cite", "HTMLPhraseElement"),
    ("code", "HTMLElement"),
    ("col", "HTMLTableColElement"),
    ("colgroup", "HTMLTableColElement"),
    ("data", "HTMLDataElement"),
    ("datalist", "HTMLDataListElement"),
    ("dd", "HTMLElement"),
    ("del", "HTMLModElement"),
    ("details", "HTMLDetailsElement"),
    ("dfn", "HTMLElement"),
    ("dialog", "HTMLDialogElement"),
    ("div", "HTMLDivElement"),
    ("dl", "HTMLDListElement"),
    ("dt", "HTMLElement"),
    ("em", "HTMLElement"),
    ("embed", "HTMLEmbedElement"),
    ("fieldset", "HTMLFieldSetElement"),
    ("figcaption", "HTMLElement"),
    ("figure", "HTMLElement"),
    ("footer", "HTMLElement"),
    ("form", "HTMLFormElement"),
    ("h1", "HTMLHeadingElement"),
    ("h2", "HTMLHeadingElement"),
    ("h3", "HTMLHeadingElement"),
    ("h4", "HTMLHeadingElement"),
    ("h5", "HTMLHeadingElement"),
    ("h6", "HTMLHeadingElement"),
    ("head", "HTMLHeadElement"),
    ("header", "HTMLElement"),
    ("hgroup", "HTMLElement"),
    ("hr", "HTMLHRElement"),
    ("html", "HTMLHtmlElement"),
    ("i", "HTMLElement"),
    ("iframe", "HTMLIFrameElement"),
    ("img", "HTMLImageElement"),
    ("input", "HTMLInputElement"),
    ("ins", "HTMLModElement"),
    ("kbd", "HTMLElement"),
    ("label", "HTMLLabelElement"),
    ("legend", "HTMLLegendElement"),
    ("li", "HTMLLIElement"),
    ("link", "HTMLLinkElement"),
    ("main", "HTMLElement"),
    ("map", "HTMLMapElement"),
    ("mark", "HTMLElement"),
    ("menu", "HTMLMenuElement"),
    ("meta", "HTMLMetaElement"),
    ("meter", "HTMLMeterElement"),
    ("nav", "HTMLElement"),
    ("noscript", "HTMLElement"),
    ("object", "HTMLObjectElement"),
    ("ol", "HTMLOListElement"),
    ("optgroup", "HTMLOptGroupElement"),
    ("option", "HTMLOptionElement"),
    ("output", "HTMLOutputElement"),
    ("p", "HTMLParagraphElement"),
    ("picture", "HTMLPictureElement"),
    ("pre", "HTMLPreElement"),
    ("progress", "HTMLProgressElement"),
    ("q", "HTMLQuoteElement"),
    ("rp", "HTMLElement"),
    ("rt", "HTMLElement"),
    ("ruby", "HTMLElement"),
    ("s", "HTMLElement"),
    ("samp", "HTMLElement"),
    ("search", "HTMLElement"),
    ("script", "HTMLScriptElement"),
    ("section", "HTMLElement"),
    ("select", "HTMLSelectElement"),
    ("slot", "HTMLSlotElement"),
    ("small", "HTMLElement"),
    ("source", "HTMLSourceElement"),
    ("span", "HTMLSpanElement"),
    ("strong", "HTMLElement"),
    ("style", "HTMLStyleElement"),
    ("sub", "HTMLElement"),
    ("summary", "HTMLElement"),
    ("sup", "HTMLElement"),
    ("table", "HTMLTableElement"),
    ("tbody", "HTMLTableSectionElement"),
    ("td", "HTMLTableCellElement"),
    ("template", "HTMLTemplateElement"),
    ("textarea", "HTMLTextAreaElement"),
    ("tfoot", "HTMLTableSectionElement"),
    ("th", "HTMLTableCellElement"),
    ("thead", "HTMLTableSectionElement"),
    ("time", "HTMLTimeElement"),
    ("title", "HTMLTitleElement"),
    ("tr", "HTMLTableRowElement"),
    ("track", "HTMLTrackElement"),
    ("u", "HTMLElement"),
    ("ul", "HTMLUListElement"),
    ("var", "HTMLElement"),
    ("video", "HTMLVideoElement"),
    ("wbr", "HTMLElement"),
];

/// Interface name of a built-in tag.
#[must_use]
pub fn builtin_class_for_tag(tag: &str) -> Option<&'static str> {
    BUILTIN_TAG_CLASSES
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, class)| *class)
}

/// First built-in tag whose interface is `class`.
#[must_use]
pub fn builtin_tag_for_class(class: &str) -> Option<&'static str> {
    BUILTIN_TAG_CLASSES
        .iter()
        .find(|(_, c)| *c == class)
        .map(|(tag, _)| *tag)
}

/// Returns `true` if `class` is the interface of some built-in tag.
#[must_use]
pub fn is_builtin_element_class(class: &str) -> bool {
    builtin_tag_for_class(class).is_some()
}

/// Names reserved by SVG and MathML.
pub const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Outcome of validating a custom element name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCheck {
    /// The name is valid and follows naming advice.
    Valid,
    /// The name is valid but discouraged.
    Warning(&'static str),
    /// The name cannot be registered.
    Error(&'static str),
}

impl NameCheck {
    /// Message for warnings and errors.
    #[must_use]
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::Valid => None,
            Self::Warning(m) | Self::Error(m) => Some(m),
        }
    }

    /// Returns `true` unless the name is an error.
    #[must_use]
    pub fn is_valid(self) -> bool {
        !matches!(self, Self::Error(_))
    }
}

/// `PCENChar` from the HTML standard.
fn is_pcen_char(c: char) -> bool {
    matches!(c,
        '-' | '.' | '0'..='9' | '_' | 'a'..='z'
        | '\u{B7}'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{203F}'..='\u{2040}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

/// Matches the `potential-custom-element-name` production.
#[must_use]
pub fn is_potential_custom_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && name.contains('-')
        && chars.all(is_pcen_char)
}

fn name_error(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return Some("Missing element name.");
    }
    if name.chars().any(|c| c.is_ascii_uppercase()) {
        return Some("Custom element names must not contain uppercase ASCII characters.");
    }
    if !name.contains('-') {
        return Some("Custom element names must contain a hyphen. Example: unicorn-cake");
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Some("Custom element names must not start with a digit.");
    }
    if name.starts_with('-') {
        return Some("Custom element names must not start with a hyphen.");
    }
    if !is_potential_custom_element_name(name) {
        return Some("Invalid element name.");
    }
    if RESERVED_NAMES.contains(&name) {
        return Some(
            "The supplied element name is reserved and can't be used.\nSee: https://html.spec.whatwg.org/multipage/scripting.html#valid-custom-element-name",
        );
    }
    None
}

fn name_warning(name: &str) -> Option<&'static str> {
    let lower = name.to_ascii_lowercase();
    if lower.starts_with("polymer-") {
        return Some("Custom element names should not start with `polymer-`.\nSee: http://webcomponents.github.io/articles/how-should-i-name-my-element");
    }
    if lower.starts_with("x-") {
        return Some("Custom element names should not start with `x-`.\nSee: http://webcomponents.github.io/articles/how-should-i-name-my-element/");
    }
    if lower.starts_with("ng-") {
        return Some("Custom element names should not start with `ng-`.\nSee: http://docs.angularjs.org/guide/directive#creating-directives");
    }
    if lower.starts_with("xml") {
        return Some("Custom element names should not start with `xml`.");
    }
    if name.ends_with('-') {
        return Some("Custom element names should not end with a hyphen.");
    }
    if name.ends_with(|c: char| !c.is_ascii_alphanumeric()) {
        return Some("Custom element names should not end with a non-alpha character.");
    }
    if name.contains('.') {
        return Some("Custom element names should not contain a dot character as it would need to be escaped in a CSS selector.");
    }
    if name.chars().any(|c| !(' '..='~').contains(&c)) {
        return Some("Custom element names should not contain non-ASCII characters.");
    }
    if name.contains("--") {
        return Some("Custom element names should not contain consecutive hyphens.");
    }
    let has_consecutive_symbols = name
        .chars()
        .zip(name.chars().skip(1))
        .any(|(a, b)| !a.is_ascii_alphanumeric() && !b.is_ascii_alphanumeric());
    if has_consecutive_symbols {
        return Some("Custom element names should not contain consecutive non-alpha characters.");
    }
    None
}

/// Validates `name` as a custom element name.
///
/// Errors take precedence over warnings, and only the first problem found
/// is reported.
#[must_use]
pub fn validate_element_name(name: &str) -> NameCheck {
    if let Some(error) = name_error(name) {
        return NameCheck::Error(error);
    }
    name_warning(name).map_or(NameCheck::Valid, NameCheck::Warning)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookups() {
        assert_eq!(builtin_class_for_tag("div"), Some("HTMLDivElement"));
        assert_eq!(builtin_class_for_tag("x-foo"), None);
        assert_eq!(builtin_tag_for_class("HTMLHeadingElement"), Some("h1"));
        assert!(is_builtin_element_class("HTMLElement"));
        assert!(!is_builtin_element_class("LitElement"));
    }

    #[test]
    fn valid_names() {
        for name in ["my-app", "a-", "emotion-😍", "math-α", "my-app2"] {
            assert!(validate_element_name(name).is_valid(), "{name}");
        }
        assert_eq!(validate_element_name("my-app"), NameCheck::Valid);
    }

    #[test]
    fn errors() {
        let cases = [
            ("", "Missing element name."),
            ("my-App", "Custom element names must not contain uppercase ASCII characters."),
            ("app", "Custom element names must contain a hyphen. Example: unicorn-cake"),
            ("1-app", "Custom element names must not start with a digit."),
            ("-app", "Custom element names must not start with a hyphen."),
            ("my-app!", "Invalid element name."),
        ];
        for (name, message) in cases {
            assert_eq!(validate_element_name(name), NameCheck::Error(message), "{name}");
        }
        assert!(!validate_element_name("font-face").is_valid());
    }

    #[test]
    fn warnings() {
        let cases = [
            ("xml-app", "Custom element names should not start with `xml`."),
            ("my-app-", "Custom element names should not end with a hyphen."),
            ("my--app", "Custom element names should not contain consecutive hyphens."),
            ("my-app_", "Custom element names should not end with a non-alpha character."),
            ("my-a_.b", "Custom element names should not contain a dot character as it would need to be escaped in a CSS selector."),
            ("my-_app", "Custom element names should not contain consecutive non-alpha characters."),
        ];
        for (name, message) in cases {
            assert_eq!(validate_element_name(name), NameCheck::Warning(message), "{name}");
        }
        assert!(matches!(validate_element_name("x-foo"), NameCheck::Warning(_)));
        assert!(matches!(validate_element_name("emotion-😍"), NameCheck::Warning(_)));
    }
}
