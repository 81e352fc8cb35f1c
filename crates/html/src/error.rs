use thiserror::Error;

#[derive(Error, Debug)]
pub enum HtmlError {
    #[error("Failed to parse HTML: {0}")]
    Parse(#[source] std::io::Error),

    #[error("Tree construction failed: {0}")]
    Dom(#[from] stitch_dom::DomError),

    #[error("Void element <{0}> has child nodes")]
    VoidElementChildren(String),

    #[error("Serialized output is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
