//! Parsing context passed alongside a document

/// Context for a listing detail page
#[derive(Debug, Clone)]
pub struct DetailParseContext {
    /// URL the document was served from (post-redirect)
    pub url: String,
}

impl DetailParseContext {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
