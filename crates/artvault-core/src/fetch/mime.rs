//! Content-Type checks and extension mapping for image responses.

/// Content type assumed when the server sends none.
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Extension used for image types not in the table.
pub const DEFAULT_EXTENSION: &str = ".jpg";

const EXTENSIONS: &[(&str, &str)] = &[
    ("image/jpeg", ".jpg"),
    ("image/jpg", ".jpg"),
    ("image/png", ".png"),
    ("image/gif", ".gif"),
    ("image/webp", ".webp"),
    ("image/svg+xml", ".svg"),
];

/// True if the Content-Type value names an image (substring match on `image`).
pub fn is_image(content_type: &str) -> bool {
    content_type.contains("image")
}

/// Media type without parameters, lowercased: `"Image/PNG; q=1"` → `"image/png"`.
pub fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// File extension (with leading dot) for an image Content-Type.
pub fn extension_for(content_type: &str) -> &'static str {
    let essence = essence(content_type);
    EXTENSIONS
        .iter()
        .find(|(mime, _)| *mime == essence)
        .map(|(_, ext)| *ext)
        .unwrap_or(DEFAULT_EXTENSION)
}
