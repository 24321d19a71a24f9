/// Parse and validate a directive name given with `--directive`.
///
/// Directive names start with a letter or digit and may contain letters,
/// digits, `-`, `_`, `.`, `+` and single colons (`py:figure`). Trailing
/// `::` as written in a document is stripped.
///
/// # Errors
///
/// Returns an error message if the name is empty or has invalid characters.
pub fn parse_directive(s: &str) -> Result<String, String> {
    let name = s.trim().trim_end_matches("::");
    if name.is_empty() {
        return Err("Directive name cannot be empty".to_string());
    }

    if !name.starts_with(|c: char| c.is_ascii_alphanumeric()) {
        return Err(format!(
            "Directive name must start with a letter or digit: '{}'",
            s
        ));
    }

    let valid = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+' | ':'));
    if !valid || name.ends_with(':') {
        return Err(format!(
            "Directive name can only contain letters, digits, '-', '_', '.', '+' or ':': '{}'",
            s
        ));
    }

    Ok(name.to_string())
}

/// Parse a document extension, accepting it with or without the leading dot.
///
/// # Errors
///
/// Returns an error message for empty extensions or ones containing separators.
pub fn parse_extension(s: &str) -> Result<String, String> {
    let ext = s.trim().trim_start_matches('.');
    if ext.is_empty() {
        return Err("Extension cannot be empty".to_string());
    }
    if ext.contains(['/', '\\', '.']) {
        return Err(format!("Extension must be a single suffix like 'rst': '{}'", s));
    }
    Ok(ext.to_string())
}
