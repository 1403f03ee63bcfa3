/// Problems found before a request ever reaches the network
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a URL.")]
    EmptyUrl,
    #[error("Invalid JSON body: {0}")]
    InvalidJsonBody(String),
}
