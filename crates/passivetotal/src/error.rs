use derive_more::From;
use reqwest::StatusCode;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, From)]
pub enum Error {
    CliUsage(String),

    // -- Provider
    HttpStatus(StatusCode),
    MalformedResponse {
        integration: &'static str,
        field: &'static str,
    },

    #[from]
    Reqwest(reqwest::Error),

    #[from]
    Json(serde_json::Error),

    #[from]
    SystemTime(std::time::SystemTimeError),

    #[from]
    File(std::io::Error),

    #[from]
    Fmt(std::fmt::Error),

    #[from]
    Subscriber(tracing::subscriber::SetGlobalDefaultError),
}

impl Error {
    /// True when the provider answered 404, which it does for unknown indicators.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::HttpStatus(status) => *status == StatusCode::NOT_FOUND,
            Error::Reqwest(err) => err.status() == Some(StatusCode::NOT_FOUND),
            _ => false,
        }
    }
}

// region:    --- Error Boilerplate

impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate
