//! Input text normalization.

/// Normalize raw input text for analysis and storage.
///
/// Removes C0/C1 control characters, maps the usual smart-punctuation
/// code points to plain ASCII, collapses whitespace runs (including
/// newlines and tabs) to single spaces, and trims the ends. Total and
/// idempotent; the empty string maps to itself.
pub fn normalize(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            // Smart punctuation → ASCII
            '\u{2018}' | '\u{2019}' => cleaned.push('\''),
            '\u{201C}' | '\u{201D}' => cleaned.push('"'),
            '\u{2013}' | '\u{2014}' => cleaned.push('-'),
            '\u{2026}' => cleaned.push_str("..."),
            // Tab/newline/CR fold into the whitespace collapse below
            '\t' | '\n' | '\r' => cleaned.push(' '),
            c if is_control(c) => {}
            c => cleaned.push(c),
        }
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// C0 (0x00–0x1F), DEL, and C1 (0x7F–0x9F) ranges.
fn is_control(c: char) -> bool {
    let cp = c as u32;
    cp <= 0x1F || (0x7F..=0x9F).contains(&cp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_whitespace_collapse() {
        assert_eq!(normalize("  hello \t\n  world \r\n"), "hello world");
    }

    #[test]
    fn test_control_characters_removed() {
        assert_eq!(normalize("a\u{0}b\u{8}c\u{7F}d\u{9F}e"), "abcde");
        let out = normalize("x\u{1}\u{2}\u{3} y");
        for c in out.chars() {
            let cp = c as u32;
            assert!(cp > 0x1F && !(0x7F..=0x9F).contains(&cp), "control char {:#x} survived", cp);
        }
    }

    #[test]
    fn test_smart_punctuation() {
        assert_eq!(
            normalize("\u{2018}quoted\u{2019} \u{201C}text\u{201D} \u{2013} dash \u{2014} more\u{2026}"),
            "'quoted' \"text\" - dash - more..."
        );
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "plain text",
            "  spaced\t\tout  ",
            "smart \u{201C}quotes\u{201D}\u{2026}",
            "ctrl\u{0}chars\u{1F}here",
            "",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }
}
