//! String literal escaping for interpolated values.
//!
//! Every value the builders interpolate ends up between single quotes, so the
//! one property that matters is that no output can close the literal early.

use std::borrow::Cow;

/// Escape `text` for use inside a single-quoted SQL literal.
///
/// - `'` becomes `''`
/// - `"` becomes `\"`
/// - `\` becomes `\\`
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
pub fn escape_literal(text: &str) -> Cow<'_, str> {
    if !text.contains(['\'', '"', '\\']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '\'' => out.push_str("''"),
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Null-propagating form of [`escape_literal`]: `None` stays `None`.
pub fn escape(text: Option<&str>) -> Option<Cow<'_, str>> {
    text.map(escape_literal)
}

/// Push `'<escaped text>'` onto `out`.
pub(crate) fn push_quoted(out: &mut String, text: &str) {
    out.push('\'');
    out.push_str(&escape_literal(text));
    out.push('\'');
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn null_propagates() {
        assert_eq!(escape(None), None);
        assert_eq!(escape(Some("abc")).as_deref(), Some("abc"));
    }

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(escape_literal("hello world"), Cow::Borrowed(_)));
    }

    #[test]
    fn single_quotes_are_doubled() {
        assert_eq!(escape_literal("o'brien"), "o''brien");
        assert_eq!(escape_literal("''"), "''''");
    }

    #[test]
    fn backslash_and_double_quote_prefix_themselves() {
        assert_eq!(escape_literal(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_literal(r"C:\temp"), r"C:\\temp");
        assert_eq!(escape_literal(r"\'"), r"\\''");
    }

    #[test]
    fn injection_attempt_stays_inside_literal() {
        let mut out = String::new();
        push_quoted(&mut out, "x' or '1'='1");
        assert_eq!(out, "'x'' or ''1''=''1'");
    }

    /// Strip one leading and trailing quote and check that every remaining
    /// quote is part of a `''` pair.
    fn quotes_balanced(literal: &str) -> bool {
        let inner = &literal[1..literal.len() - 1];
        let mut chars = inner.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\'' && chars.next() != Some('\'') {
                return false;
            }
        }
        true
    }

    proptest! {
        #[test]
        fn never_leaves_unescaped_quotes(s in ".*") {
            let escaped = escape_literal(&s);
            prop_assert!(escaped.matches('\'').count() % 2 == 0, "unescaped quote in: {}", escaped);
        }

        #[test]
        fn quoted_literal_is_closed_only_at_the_end(s in "[a-z'\\\\\" ]{0,32}") {
            let mut out = String::new();
            push_quoted(&mut out, &s);
            prop_assert!(quotes_balanced(&out), "literal breaks out: {}", out);
        }
    }
}
