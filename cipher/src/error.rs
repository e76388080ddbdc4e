use std::{error::Error, fmt::Display};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CipherError {
    /// 不合法分组大小
    InvalidBlockSize { target: usize, real: usize },

    /// 不合法的密钥长度
    InvalidKeyLength { target: usize, real: usize },

    /// 不合法的初始向量长度
    InvalidIVLength { target: usize, real: usize },

    /// 工作模式需要初始向量但未指定
    MissingIV,

    /// 解密后的填充数据不合法
    InvalidPadding,

    /// 数据长度`len`不是分组大小`block_size`的整数倍
    InvalidBlockAlignment { block_size: usize, len: usize },

    /// 不支持的工作模式或填充方式
    UnsupportedMode(String),
}

impl Display for CipherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBlockSize { target, real } => f.write_fmt(format_args!(
                "Invalid block data size `{real}` not match to target size `{target}`"
            )),
            Self::InvalidKeyLength { target, real } => f.write_fmt(format_args!(
                "Invalid key size `{real}` not match to target size `{target}`"
            )),
            Self::InvalidIVLength { target, real } => f.write_fmt(format_args!(
                "Invalid initial vector size `{real}` not match to target size `{target}`"
            )),
            Self::MissingIV => f.write_str("need to specified the initial vector"),
            Self::InvalidPadding => f.write_str("Invalid padding data"),
            Self::InvalidBlockAlignment { block_size, len } => f.write_fmt(format_args!(
                "data size `{len}` is not a multiple of the block size `{block_size}`"
            )),
            Self::UnsupportedMode(s) => f.write_fmt(format_args!("unsupported mode: {s}")),
        }
    }
}

impl Error for CipherError {}
