//! Package identifier validation

const MAX_IDENTIFIER_LEN: usize = 256;

/// Check whether `identifier` is a well-formed package path.
///
/// Slash-separated, non-empty elements of ASCII alphanumerics and `-._~`.
/// Elements may not start with a dot, which also rules out `.` and `..`.
pub fn is_valid_identifier(identifier: &str) -> bool {
    if identifier.is_empty() || identifier.len() > MAX_IDENTIFIER_LEN {
        return false;
    }

    identifier.split('/').all(|elem| {
        !elem.is_empty()
            && !elem.starts_with('.')
            && elem
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~'))
    })
}
