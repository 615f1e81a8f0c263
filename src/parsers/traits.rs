use crate::error::ParseError;
use crate::models::Record;

/// Common trait for all site parsers.
/// One implementation per source website; this allows adding new sources by
/// substituting configuration and vocabulary, not control flow.
pub trait SiteParser: Send + Sync {
    /// Unique id of the source website. Stored in every produced record.
    fn source(&self) -> &'static str;

    /// Parse an already-retrieved document body into a validated record.
    /// `uri` is the absolute address the body was retrieved from; it is
    /// stored in the record and anchors relative paths.
    ///
    /// Any lookup miss is terminal for this document — no partial record is
    /// ever returned.
    fn parse(&self, body: &str, uri: &str) -> Result<Record, ParseError>;
}
