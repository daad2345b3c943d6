//! Export artifacts and download naming.

/// A finished export, ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Build a unique download name: `<tag>-<timestamp_ms>.<extension>`.
///
/// The tag is lowercased and any run of characters other than ASCII
/// alphanumerics collapses to a single `-`.
pub fn export_file_name(tag: &str, timestamp_ms: u64, extension: &str) -> String {
    let mut slug = String::with_capacity(tag.len());
    for c in tag.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    let slug = if slug.is_empty() { "export" } else { slug };
    format!("{slug}-{timestamp_ms}.{extension}")
}
