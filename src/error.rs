use cipher::CipherError;
use crypto_hash::HashError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GmError {
    #[error("Invalid hex string: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("The plaintext is not valid UTF-8, use `--hex-out` to display it: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("only input the one input data source of <PIPE | STRING | --hex | --file>")]
    ConflictingInput,

    #[error("The path {0} not exist")]
    PathNotExist(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("load config failed: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error(transparent)]
    Cipher(#[from] CipherError),
}
