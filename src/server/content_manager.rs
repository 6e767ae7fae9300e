use std::io;

/// A source of content addressed by request file name.
pub trait ContentManager {
    /// Loads the complete content stored under `name`.
    ///
    /// The name is the request target with its leading slash removed. Any
    /// error, including the name referring to a directory, means there is
    /// nothing to serve.
    fn find_content(&self, name: &str) -> io::Result<Vec<u8>>;
}
