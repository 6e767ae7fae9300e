use std::collections::HashMap;

const DEFAULT_TYPES: &[(&str, &str)] = &[
    ("bin", "application/octet-stream"),
    ("bmp", "image/bmp"),
    ("css", "text/css"),
    ("csv", "text/csv"),
    ("gif", "image/gif"),
    ("htm", "text/html"),
    ("html", "text/html"),
    ("ico", "image/x-icon"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("js", "text/javascript"),
    ("json", "application/json"),
    ("mjs", "text/javascript"),
    ("png", "image/png"),
    ("svg", "image/svg+xml"),
    ("txt", "text/plain"),
    ("webp", "image/webp"),
];

/// Maps lowercase file extensions, without the dot, to MIME types.
#[derive(Clone, Debug)]
pub struct MimeTable {
    types: HashMap<String, String>
}

impl MimeTable {
    pub fn empty() -> MimeTable {
        MimeTable { types: HashMap::new() }
    }

    /// Overlays `extra` onto the table. Entries in `extra` win.
    pub fn extend<I>(&mut self, extra: I)
        where I: IntoIterator<Item = (String, String)> {
        for (extension, mime_type) in extra {
            self.types.insert(extension.to_lowercase(), mime_type);
        }
    }

    pub fn get(&self, extension: &str) -> Option<&str> {
        self.types.get(extension).map(String::as_str)
    }

    /// Looks up the content type for a request file name.
    pub fn for_file_name(&self, file_name: &str) -> Option<&str> {
        extension_of(file_name).and_then(|extension| self.get(&extension))
    }
}

impl Default for MimeTable {
    fn default() -> MimeTable {
        let mut table = MimeTable::empty();
        table.extend(DEFAULT_TYPES.iter().map(|&(extension, mime_type)| {
            (extension.to_string(), mime_type.to_string())
        }));
        table
    }
}

/// Returns the lowercased extension of the last segment of `file_name`.
///
/// This is everything after the last dot. A leading dot counts, so
/// `.bashrc` has the extension `bashrc`. A trailing dot yields nothing.
pub fn extension_of(file_name: &str) -> Option<String> {
    let segment = match file_name.rfind(|c| c == '/' || c == '\\') {
        Some(index) => &file_name[index + 1..],
        None => file_name
    };
    match segment.rfind('.') {
        Some(index) if index + 1 < segment.len() => {
            Some(segment[index + 1..].to_lowercase())
        }
        _ => None
    }
}

#[cfg(test)]
mod tests {
    use super::{extension_of, MimeTable};

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension_of("index.HTML"), Some("html".to_string()));
        assert_eq!(extension_of("archive.tar.gz"), Some("gz".to_string()));
    }

    #[test]
    fn extension_only_from_last_segment() {
        assert_eq!(extension_of("dir.v1/README"), None);
        assert_eq!(extension_of("dir.v1/app.js"), Some("js".to_string()));
    }

    #[test]
    fn no_extension_without_dot() {
        assert_eq!(extension_of("Makefile"), None);
        assert_eq!(extension_of("trailing."), None);
        assert_eq!(extension_of(""), None);
    }

    #[test]
    fn leading_dot_is_an_extension() {
        assert_eq!(extension_of(".bashrc"), Some("bashrc".to_string()));
    }

    #[test]
    fn default_table_has_builtin_types() {
        let table = MimeTable::default();
        assert_eq!(table.types.len(), 17);
        assert_eq!(table.get("html"), Some("text/html"));
        assert_eq!(table.get("svg"), Some("image/svg+xml"));
        assert_eq!(table.get("foo"), None);
    }

    #[test]
    fn overlay_wins_and_is_lowercased() {
        let mut table = MimeTable::default();
        table.extend(vec![
            ("txt".to_string(), "text/x-custom".to_string()),
            ("FOO".to_string(), "application/x-foo".to_string()),
        ]);
        assert_eq!(table.get("txt"), Some("text/x-custom"));
        assert_eq!(table.for_file_name("a.Foo"), Some("application/x-foo"));
    }

    #[test]
    fn unknown_extension_has_no_type() {
        let table = MimeTable::default();
        assert_eq!(table.for_file_name("data.xyz"), None);
        assert_eq!(table.for_file_name("LICENSE"), None);
    }
}
