/// Errors that can occur while reading or writing "peaklist.xml" documents
#[derive(Debug, thiserror::Error)]
pub enum PeakListError {
    /// XML syntax error from the underlying parser
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// I/O error while serializing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Attribute value is not valid UTF-8
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Attribute value failed to parse as its expected type
    #[error("invalid {0} attribute: {1:?}")]
    InvalidAttribute(&'static str, String),

    /// Document ended inside an open element
    #[error("invalid peaklist structure: {0}")]
    InvalidStructure(String),
}
