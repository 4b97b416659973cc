#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RecordError {
    #[error("could not parse date \"{input}\", expected DD.MM.YYYY: {source}")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
}
