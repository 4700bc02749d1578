use std::borrow::Cow;

/// Strip characters that XML 1.0 documents may not contain.
///
/// Removes C0 control characters other than tab, newline and carriage
/// return, plus DEL (0x7F) and the noncharacters U+FFFE and U+FFFF. Values
/// pulled from databases or scraped pages regularly carry these, and a single
/// one makes the whole feed unparseable for strict readers.
///
/// Returns `Cow::Borrowed` when the input is already clean (common case).
///
/// # Examples
///
/// ```
/// use rssgen::util::strip_xml_invalid_chars;
///
/// assert_eq!(strip_xml_invalid_chars("bell\x07 ring"), "bell ring");
/// assert_eq!(strip_xml_invalid_chars("tab\tok"), "tab\tok");
/// ```
pub fn strip_xml_invalid_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_forbidden) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|&c| !is_forbidden(c)).collect())
}

fn is_forbidden(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => false,
        '\u{0}'..='\u{1f}' | '\u{7f}' | '\u{fffe}' | '\u{ffff}' => true,
        _ => false,
    }
}
