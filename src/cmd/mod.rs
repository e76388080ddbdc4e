pub mod args;
pub mod config;

mod hash;
pub use hash::{HMACArgs, HashArgs};

pub mod crypto;
pub use crypto::CryptoArgs;

/// 按配置输出16进制字符串
pub fn to_hex_string(data: &[u8], prefix: bool, uppercase: bool) -> String {
    let s = if uppercase {
        hex::encode_upper(data)
    } else {
        hex::encode(data)
    };

    match (prefix, uppercase) {
        (true, true) => format!("0X{s}"),
        (true, false) => format!("0x{s}"),
        _ => s,
    }
}
