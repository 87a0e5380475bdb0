use reqwest::StatusCode;

#[derive(Debug)]
pub struct UnexpectedStatusError {
    pub url: String,
    pub status: StatusCode,
}

impl std::fmt::Display for UnexpectedStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} answered with status {}", self.url, self.status)
    }
}

impl std::error::Error for UnexpectedStatusError {}
