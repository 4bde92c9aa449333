pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid config value for `{key}`: {message}")]
    InvalidConfig { key: String, message: String },

    #[error("Invalid config JSON: {message}")]
    InvalidConfigJson { message: String },
}
