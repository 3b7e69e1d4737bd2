use thiserror::Error;

pub type ReviewResult<T> = Result<T, ReviewError>;

#[derive(Debug, Error)]
pub enum ReviewError {
    /// A single timestamp could not be normalized. Callers drop the point.
    #[error("invalid timestamp `{raw}`: {reason}")]
    InvalidTimestamp { raw: String, reason: &'static str },

    #[error("mismatch between timestamps and raw data: values={values}, timestamps={timestamps}")]
    DataMismatch { values: usize, timestamps: usize },

    #[error("unexpected response format from compression endpoint: {0}")]
    ResponseFormat(String),

    #[error("compression request failed: {0}")]
    Transport(String),

    #[error("no raw data loaded")]
    NoDataLoaded,

    #[error("invalid data: {0}")]
    InvalidData(String),
}
