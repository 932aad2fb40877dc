// Shared XML text helpers used by the JSON → XML and CSV → XML converters.

/// Escapes the five XML special characters.
///
/// # Example
/// ```
/// use devtoolkit_core::convert::helpers::xml_escape;
/// assert_eq!(xml_escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&apos;");
/// ```
pub fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Turns an arbitrary key into a usable XML element name.
///
/// Characters that cannot appear in a name become `_`; names that would start with a
/// digit, `-` or `.` get a leading `_`. Valid names are returned unchanged.
pub fn xml_tag_name(key: &str) -> String {
    let trimmed = key.trim();
    let mut out: String = trimmed
        .chars()
        .map(|ch| if is_name_char(ch) { ch } else { '_' })
        .collect();
    match out.chars().next() {
        None => out.push('_'),
        Some(first) if !is_name_start(first) => out.insert(0, '_'),
        Some(_) => {}
    }
    out
}

fn is_name_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == ':'
}

fn is_name_char(ch: char) -> bool {
    is_name_start(ch) || ch.is_ascii_digit() || ch == '-' || ch == '.' || ch.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names_pass_through() {
        assert_eq!(xml_tag_name("person"), "person");
        assert_eq!(xml_tag_name("first-name.v2"), "first-name.v2");
        assert_eq!(xml_tag_name("ns:item"), "ns:item");
    }

    #[test]
    fn invalid_names_are_sanitized() {
        assert_eq!(xml_tag_name("first name"), "first_name");
        assert_eq!(xml_tag_name("1st"), "_1st");
        assert_eq!(xml_tag_name(""), "_");
        assert_eq!(xml_tag_name("a<b>"), "a_b_");
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        assert_eq!(xml_escape("Peter Parker"), "Peter Parker");
    }
}
