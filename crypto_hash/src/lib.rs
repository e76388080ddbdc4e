mod output;
pub use output::Output;

mod error;
pub use error::HashError;

pub mod builder;
pub use builder::{HasherBuilder, HasherType};

pub mod hmac;
pub use hmac::{hmac_sm3, HMAC};

pub mod sm3;
pub use sm3::SM3;

/// 哈希算法实现该trait, 计算消息的摘要. 消息需完整地给出, 不提供增量更新.
///
/// 可用于如下安全应用中:
/// - 数据一致性验证;
/// - 参与数字签名的生成和验证;
/// - 密钥派生;
/// - 消息认证码(HMAC);
pub trait Digest {
    /// 哈希算法每次按块处理消息的块的位长度
    const BLOCK_BITS: usize;
    /// 哈希算法将每个块按该位长度划分为若干个单词
    const WORD_BITS: usize;
    /// 哈希算法生成的摘要的位长度
    const DIGEST_BITS: usize;

    /// 生成消息摘要
    fn digest(msg: &[u8]) -> Output<Self>;
}
