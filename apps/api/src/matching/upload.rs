//! Upload filename hygiene.

const FALLBACK_FILENAME: &str = "resume.pdf";
const FALLBACK_ID_PART: &str = "Applicant";

/// True when `filename` carries a `.pdf` extension (any case).
pub fn is_pdf(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
}

/// Reduces a client-supplied filename to a safe basename: keeps ASCII
/// alphanumerics and `.-_`, turns whitespace into `_`, drops directory
/// components and leading dots.
pub fn sanitize_filename(filename: &str) -> String {
    let basename = filename.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = basename
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Reduces an applicant name to a single URL path segment for use in ids:
/// ASCII alphanumerics, `-` and `_` survive, whitespace becomes `_`.
pub fn sanitize_id_part(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '-' | '_') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();

    if cleaned.is_empty() {
        FALLBACK_ID_PART.to_string()
    } else {
        cleaned
    }
}
