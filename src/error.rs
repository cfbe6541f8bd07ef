/// Reasons a message definition can not be turned into a checksum or layout
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("malformed type string `{type_string}`")]
    MalformedType { type_string: String },

    #[error("unknown base type `{base_type}`")]
    UnknownBaseType { base_type: String },

    /// Array lengths must be in `1..=255`, they are folded into the checksum as one byte
    #[error("invalid array length {length} in type `{type_string}`")]
    InvalidArrayLength { type_string: String, length: i64 },

    #[error("`{text}` contains characters outside the single byte range")]
    InvalidText { text: String },
}

pub type Result<T> = std::result::Result<T, Error>;
