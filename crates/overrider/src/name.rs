//! Qualified-name to override-path mapping.

/// Replace every occurrence of `base` with `root` and every occurrence of
/// `separator` with `/`, in a single left-to-right scan.
///
/// Both replacements are literal. Output of one replacement is never scanned
/// again, so a separator inside `root` survives untouched. `root` is expected
/// to end in a path separator already, so a namespace separator directly
/// after a replaced `base` is absorbed rather than doubled.
///
/// `base` is matched anywhere in the input, not only as a prefix.
pub(crate) fn substitute(qualified: &str, base: &str, root: &str, separator: &str) -> String {
    let mut out = String::with_capacity(qualified.len() + root.len());
    let mut rest = qualified;

    while let Some(ch) = rest.chars().next() {
        let after_base = (!base.is_empty()).then(|| rest.strip_prefix(base)).flatten();
        let after_separator = (!separator.is_empty())
            .then(|| rest.strip_prefix(separator))
            .flatten();

        if let Some(after) = after_base {
            out.push_str(root);
            rest = after.strip_prefix(separator).unwrap_or(after);
        } else if let Some(after) = after_separator {
            out.push('/');
            rest = after;
        } else {
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }

    out
}
