//! Decode-side code canonicalization.

/// Canonicalize a raw code token for dictionary lookup.
///
/// Short all-digit tokens are left-padded to three digits, `x01`-style
/// tokens are uppercased. Anything else passes through trimmed but otherwise
/// untouched, so an unrecognized token simply fails lookup.
pub fn normalize_code(token: &str) -> String {
    let code = token.trim();
    if code.is_empty() {
        return String::new();
    }

    let len = code.chars().count();
    if code.bytes().all(|b| b.is_ascii_digit()) {
        // 100-999 and 4-digit codes are already canonical; shorter runs are
        // zero-padded to three digits.
        return format!("{code:0>3}");
    }

    let mut chars = code.chars();
    if len == 3
        && chars.next().is_some_and(char::is_alphabetic)
        && chars.all(|c| c.is_ascii_digit())
    {
        return code.to_uppercase();
    }

    code.to_string()
}
