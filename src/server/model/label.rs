/// Normalized form of an office, participant or department label.
///
/// Labels are compared after trimming surrounding whitespace and ignoring case, so
/// `" Registrar "` and `"registrar"` name the same office.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Whether two labels name the same office or department.
pub fn same_label(a: &str, b: &str) -> bool {
    normalize_label(a) == normalize_label(b)
}
