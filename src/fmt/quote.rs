//! When a key or value must be quoted, and how.
//!
//! Output stays `key=value` parseable: anything that would break tokenisation (spaces,
//! `=`, quotes) or hide itself (control and other non-printable characters) is written
//! as an escaped, double-quoted literal that unescapes back to the original.

use regex::Regex;
use std::fmt::Write as _;
use std::sync::LazyLock;

/// Letters, marks, numbers, punctuation and symbols are printable; of the separators
/// only the ASCII space is.
static QUOTE_TRIGGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\s"=]|[^\p{L}\p{M}\p{N}\p{P}\p{S}]"#).expect("Invalid quoting regex")
});

/// Characters written escaped inside a quoted literal.
static ESCAPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\\"]|[^\p{L}\p{M}\p{N}\p{P}\p{S} ]"#).expect("Invalid escape regex")
});

/// True iff `s` is empty or contains whitespace, `"`, `=`, or a non-printable character.
#[must_use]
pub fn needs_quoting(s: &str) -> bool {
    s.is_empty() || QUOTE_TRIGGER.is_match(s)
}

/// Double-quoted form with backslash and `\u{..}` escapes. Printable characters,
/// combining marks included, are copied as they are.
#[must_use]
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let mut last = 0;
    for m in ESCAPED.find_iter(s) {
        out.push_str(&s[last..m.start()]);
        for c in m.as_str().chars() {
            push_escaped(&mut out, c);
        }
        last = m.end();
    }
    out.push_str(&s[last..]);
    out.push('"');
    out
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '"' => out.push_str("\\\""),
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\0' => out.push_str("\\0"),
        _ => {
            let _ = write!(out, "\\u{{{:x}}}", u32::from(c));
        }
    }
}

/// Appends `s`, quoted only when [`needs_quoting`] says so.
pub fn append_string(buf: &mut String, s: &str) {
    if needs_quoting(s) {
        buf.push_str(&quote(s));
    } else {
        buf.push_str(s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_words_are_not_quoted() {
        assert!(!needs_quoting("val"));
        assert!(!needs_quoting("a.b-c_d/e:f"));
        assert!(!needs_quoting("back\\slash"));
        assert!(!needs_quoting("héllo"));
    }

    #[test]
    fn separators_force_quoting() {
        assert!(needs_quoting(""));
        assert!(needs_quoting("a b"));
        assert!(needs_quoting("a\tb"));
        assert!(needs_quoting("a=b"));
        assert!(needs_quoting("say \"hi\""));
    }

    #[test]
    fn non_printable_forces_quoting() {
        assert!(needs_quoting("bell\u{7}"));
        assert!(needs_quoting("zero\u{200b}width"));
        assert!(needs_quoting("\u{1b}[31m"));
    }

    #[test]
    fn combining_marks_are_printable() {
        assert!(!needs_quoting("cafe\u{301}"));
        assert_eq!(quote("cafe\u{301} bar"), "\"cafe\u{301} bar\"");
    }

    #[test]
    fn escapes_control_and_format_characters() {
        assert_eq!(quote("a\"b\\c"), r#""a\"b\\c""#);
        assert_eq!(quote("x\ny\u{7}"), r#""x\ny\u{7}""#);
        assert_eq!(quote("zero\u{200b}"), r#""zero\u{200b}""#);
    }

    #[test]
    fn append_string_quotes_only_when_needed() {
        let mut buf = String::new();
        append_string(&mut buf, "plain");
        buf.push(' ');
        append_string(&mut buf, "two words");
        assert_eq!(buf, r#"plain "two words""#);
    }
}
