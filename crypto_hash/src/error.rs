use std::{error::Error, fmt::Display};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HashError {
    /// 实际字节长度`real`和目标字节长度`target`不匹配
    MismatchingByteLen { target: usize, real: usize },

    /// HMAC模式未指定密钥
    MissingHmacKey,

    /// 不支持的哈希模式
    UnsupportedMode(String),
}

impl Display for HashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashError::MismatchingByteLen { target, real } => f.write_fmt(format_args!(
                "real byte length `{real}` not match to target byte length `{target}`"
            )),
            HashError::MissingHmacKey => f.write_str("HMAC need to specified the key"),
            HashError::UnsupportedMode(s) => f.write_fmt(format_args!("unsupported hash mode: {s}")),
        }
    }
}

impl Error for HashError {}
