/// XML 1.0 valid char ranges:
/// - 0x09, 0x0A, 0x0D
/// - 0x20..=0xD7FF
/// - 0xE000..=0xFFFD
/// - 0x10000..=0x10FFFF
fn is_valid_xml_char(c: char) -> bool {
    matches!(
        c as u32,
        0x09 | 0x0A | 0x0D | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}

/// Escape text for use in element content or a double-quoted attribute.
/// Characters that XML 1.0 cannot carry are dropped.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if !is_valid_xml_char(c) {
            continue;
        }
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Format a coordinate or measurement for markup output.
///
/// Values are rounded to two decimals and trailing zeros are dropped, so
/// `40.0` prints as `40` and `53.400000000000006` as `53.4`. The output for a
/// given value is always the same string.
pub fn fmt_num(value: f64) -> String {
    let mut s = format!("{:.2}", value);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Format a value that is recorded as metadata rather than drawn: the
/// shortest string that parses back to the same `f64`.
pub fn fmt_exact(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::{escape_xml, fmt_exact, fmt_num};

    #[test]
    fn remove_invalid_control_chars() {
        let s = "Den\u{0007}#1\u{000C}";
        assert_eq!(escape_xml(s), "Den#1");
    }

    #[test]
    fn keep_valid_whitespace_controls() {
        let s = "a\tb\nc\rd";
        assert_eq!(escape_xml(s), s);
    }

    #[test]
    fn escape_special_xml_chars() {
        let s = r#"Kid's <Room> "A&B""#;
        assert_eq!(
            escape_xml(s),
            "Kid&apos;s &lt;Room&gt; &quot;A&amp;B&quot;"
        );
    }

    #[test]
    fn exact_numbers_parse_back_unchanged() {
        for value in [20.0, 12.345, 2.667, 2.333, 0.1 + 0.2, 1e-7, 123456.789] {
            let text = fmt_exact(value);
            assert_eq!(text.parse::<f64>().unwrap(), value, "{text}");
        }
        assert_eq!(fmt_exact(20.0), "20");
        assert_eq!(fmt_exact(2.667), "2.667");
        assert_eq!(fmt_exact(-0.0), "0");
    }

    #[test]
    fn numbers_drop_trailing_zeros() {
        assert_eq!(fmt_num(40.0), "40");
        assert_eq!(fmt_num(2.67 * 20.0), "53.4");
        assert_eq!(fmt_num(66.6), "66.6");
        assert_eq!(fmt_num(0.126), "0.13");
        assert_eq!(fmt_num(-3.0), "-3");
        assert_eq!(fmt_num(-0.001), "0");
    }
}
