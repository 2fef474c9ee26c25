//! Repair for raw line breaks inside JSON strings.
//!
//! The upstream service sometimes emits unescaped CR/LF bytes inside string
//! values, which is invalid JSON. Every body is passed through [`sanitize`]
//! before decoding.

/// Replace every `\r` and `\n` with a space, one for one.
pub fn sanitize(body: String) -> String {
    if body.contains(['\r', '\n']) {
        body.replace(['\r', '\n'], " ")
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_each_line_break_with_one_space() {
        assert_eq!(sanitize("a\r\nb\nc\rd".to_string()), "a  b c d");
    }

    #[test]
    fn leaves_clean_body_untouched() {
        let body = r#"{"data":[],"error":null}"#.to_string();
        assert_eq!(sanitize(body.clone()), body);
    }

    #[test]
    fn keeps_escaped_newlines() {
        // An escaped `\n` is two characters, not a line break.
        let body = r#"{"text":"a\nb"}"#.to_string();
        assert_eq!(sanitize(body.clone()), body);
    }

    #[test]
    fn makes_raw_newlines_in_strings_decodable() {
        let raw = "{\"text\":\"line one\r\nline two\"}".to_string();
        assert!(serde_json::from_str::<serde_json::Value>(&raw).is_err());

        let value: serde_json::Value = serde_json::from_str(&sanitize(raw)).unwrap();
        assert_eq!(value["text"], "line one  line two");
    }

    #[test]
    fn preserves_multibyte_text() {
        assert_eq!(sanitize("Петиция\n№1".to_string()), "Петиция №1");
    }
}
