// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extension-based MIME type guessing.

use crate::types::{MimeType, DIRECTORY_TYPE_NAME, UNKNOWN_TYPE_NAME};

/// Guess the MIME type name and description of a file from its name.
pub fn guess_name(file_name: &str) -> (&'static str, &'static str) {
    let ext = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext,
        _ => "",
    };

    match ext.to_lowercase().as_str() {
        // Text
        "txt" | "text" | "log" => ("text/plain", "Plain text document"),
        "ini" | "cfg" | "conf" => ("text/plain", "Plain text document"),
        "md" | "markdown" => ("text/markdown", "Markdown document"),
        "html" | "htm" => ("text/html", "HTML document"),
        "css" => ("text/css", "CSS stylesheet"),
        "csv" => ("text/csv", "CSV document"),
        "json" => ("application/json", "JSON document"),
        "toml" => ("application/toml", "TOML document"),
        "yaml" | "yml" => ("application/yaml", "YAML document"),
        "xml" => ("application/xml", "XML document"),

        // Code
        "rs" => ("text/x-rust", "Rust source code"),
        "py" => ("text/x-python", "Python script"),
        "js" => ("text/javascript", "JavaScript program"),
        "c" | "h" => ("text/x-c", "C source code"),
        "cpp" | "hpp" | "cc" => ("text/x-c++", "C++ source code"),
        "sh" | "bash" => ("application/x-shellscript", "Shell script"),

        // Images
        "png" => ("image/png", "PNG image"),
        "jpg" | "jpeg" => ("image/jpeg", "JPEG image"),
        "gif" => ("image/gif", "GIF image"),
        "webp" => ("image/webp", "WebP image"),
        "svg" => ("image/svg+xml", "SVG image"),

        // Audio and video
        "mp3" => ("audio/mpeg", "MP3 audio"),
        "ogg" => ("audio/ogg", "Ogg audio"),
        "flac" => ("audio/flac", "FLAC audio"),
        "mp4" => ("video/mp4", "MPEG-4 video"),
        "mkv" => ("video/x-matroska", "Matroska video"),

        // Archives and documents
        "pdf" => ("application/pdf", "PDF document"),
        "zip" => ("application/zip", "Zip archive"),
        "tar" => ("application/x-tar", "Tar archive"),
        "gz" => ("application/gzip", "Gzip archive"),
        "bz2" => ("application/x-bzip2", "Bzip2 archive"),
        "xz" => ("application/x-xz", "XZ archive"),
        "7z" => ("application/x-7z-compressed", "7-Zip archive"),

        _ => (UNKNOWN_TYPE_NAME, "Unknown"),
    }
}

/// Guess the [`MimeType`] of a regular file from its name.
pub fn guess(file_name: &str) -> MimeType {
    let (name, description) = guess_name(file_name);
    MimeType::new(name, description)
}

/// The type of every directory.
pub fn directory() -> MimeType {
    MimeType::new(DIRECTORY_TYPE_NAME, "Folder")
}

/// The type used when a file cannot be classified.
pub fn unknown() -> MimeType {
    MimeType::new(UNKNOWN_TYPE_NAME, "Unknown")
}
