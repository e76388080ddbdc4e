//! HMAC: Keyed-Hashing for Message Authentication<br>
//! [RFC 2104](https://www.rfc-editor.org/rfc/rfc2104), [GB/T 15852.2](https://openstd.samr.gov.cn/)<br>
//!
//! $$
//! HMAC(K, m) = H((K' \xor opad) | H((K' \xor ipad) | m))
//! $$
//!
//! `K'`是密钥`K`规整到哈希分组大小后的结果: 超过分组大小时先做一次哈希, 再补`0x00`到分组大小.

use crate::{Digest, Output, SM3};
use std::marker::PhantomData;
use utils::Block;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// `HMAC<Hasher>`, 按哈希算法`D`的分组大小规整密钥.
#[derive(Clone)]
pub struct HMAC<D> {
    ipad_key: Block,
    opad_key: Block,
    hasher: PhantomData<D>,
}

impl<D: Digest> HMAC<D> {
    const IPAD: u8 = 0x36;
    const OPAD: u8 = 0x5c;

    const fn block_size() -> usize {
        D::BLOCK_BITS >> 3
    }

    /// 空密钥等价于全0的分组大小密钥
    pub fn new(key: &[u8]) -> Self {
        let mut key = if key.len() > Self::block_size() {
            Block::from(D::digest(key).as_ref())
        } else {
            Block::from(key)
        };
        key.resize_zero(Self::block_size());

        let (mut ipad_key, mut opad_key) = (key.clone(), key);
        ipad_key.iter_mut().for_each(|x| *x ^= Self::IPAD);
        opad_key.iter_mut().for_each(|x| *x ^= Self::OPAD);

        Self {
            ipad_key,
            opad_key,
            hasher: PhantomData,
        }
    }

    /// 计算消息`msg`的认证码
    pub fn mac(&self, msg: &[u8]) -> Output<D> {
        let mut inner = Block::with_capacity(Self::block_size() + msg.len());
        inner.extend(self.ipad_key.iter());
        inner.extend(msg);
        #[cfg_attr(not(feature = "sec-zeroize"), allow(unused_mut))]
        let mut inner = D::digest(&inner);

        let mut outer = Block::with_capacity(Self::block_size() + inner.len());
        outer.extend(self.opad_key.iter());
        outer.extend(inner.iter());
        #[cfg(feature = "sec-zeroize")]
        inner.zeroize();

        D::digest(&outer)
    }

    /// `HMAC::new(key).mac(msg)`
    pub fn mac_with_key(key: &[u8], msg: &[u8]) -> Output<D> {
        Self::new(key).mac(msg)
    }
}

/// HMAC-SM3
pub fn hmac_sm3(key: &[u8], msg: &[u8]) -> Output<SM3> {
    HMAC::<SM3>::mac_with_key(key, msg)
}

#[cfg(test)]
mod tests {
    use super::{hmac_sm3, HMAC};
    use crate::{Digest, SM3};

    #[test]
    fn hmac_sm3_vectors() {
        let cases = [
            (
                "abe12300985eef",
                "hello world",
                "4e0430beb306ff1d646595ddf47cbf8a9f441f4ea80e12eb8230eb0d677aeb8c",
            ),
            (
                "daac25c1512fe50f79b0e4526b93f5c0e1460cef40b6dd44af13caec62e8c60e0d885f3c6d6fb51e530889e6fd4ac743a6d332e68a0f2a3923f42585dceb93e9",
                "hello world",
                "92aee474f6111e74f4745b0b10973eb2c397fa883ffa03df7b0d401a08b4a641",
            ),
            (
                "6b6579",
                "The quick brown fox jumps over the lazy dog",
                "bd4a34077888162b210645b8ebf74b9af357303789357a27c7fc457244ebd398",
            ),
            (
                "",
                "",
                "0d23f72ba15e9c189a879aefc70996b06091de6e64d31b7a84004356dd915261",
            ),
        ];

        for (i, (key, msg, mac)) in cases.into_iter().enumerate() {
            let key = hex::decode(key).unwrap();
            assert_eq!(
                hmac_sm3(&key, msg.as_bytes()).to_vec(),
                hex::decode(mac).unwrap(),
                "case {i} failed"
            );
        }
    }

    #[test]
    fn hmac_long_key_hashed() {
        let key = (0..=200u8).collect::<Vec<_>>();
        let hashed = SM3::digest(&key);
        let msg = b"The quick brown fox jumps over the lazy dog";

        assert_eq!(hmac_sm3(&key, msg), hmac_sm3(hashed.as_ref(), msg));

        // 65字节刚好超过分组大小
        let key = [0x42u8; 65];
        assert_eq!(
            hmac_sm3(&key, msg),
            hmac_sm3(SM3::digest(&key).as_ref(), msg)
        );
    }

    #[test]
    fn hmac_short_key_zero_padded() {
        let msg = b"message";
        assert_eq!(hmac_sm3(&[], msg), hmac_sm3(&[0u8; 64], msg));
        assert_eq!(hmac_sm3(&[7u8; 3], msg), hmac_sm3(&[7, 7, 7, 0, 0], msg));

        // 64字节密钥不会被哈希
        let key = [0x11u8; 64];
        assert_ne!(hmac_sm3(&key, msg), hmac_sm3(SM3::digest(&key).as_ref(), msg));
    }

    #[test]
    fn hmac_construction() {
        let (key, msg) = (b"key".as_slice(), b"data".as_slice());
        let mut k = key.to_vec();
        k.resize(64, 0);

        let mut inner = k.iter().map(|x| x ^ 0x36).collect::<Vec<_>>();
        inner.extend_from_slice(msg);
        let inner = SM3::digest(&inner);
        let mut outer = k.iter().map(|x| x ^ 0x5c).collect::<Vec<_>>();
        outer.extend_from_slice(inner.as_ref());

        let hmac = HMAC::<SM3>::new(key);
        assert_eq!(hmac.mac(msg), SM3::digest(&outer));
        assert_eq!(hmac.mac(msg).len(), 32);
        assert_eq!(hmac.mac(b""), HMAC::<SM3>::mac_with_key(key, b""));
    }
}
