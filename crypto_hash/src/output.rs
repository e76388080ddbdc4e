use crate::{Digest, HashError};
use std::{
    fmt::{Display, LowerHex, UpperHex},
    marker::PhantomData,
};
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// 消息哈希摘要输出, 按书写顺序存储, 即大端序.
///
/// 只能由哈希算法生成, 由实现算法保证`self.len() == Output::<T>::bytes()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Output<T: ?Sized> {
    data: Vec<u8>,
    digest: PhantomData<T>,
}

impl<T: ?Sized> Output<T> {
    pub(crate) const fn from_vec(digest: Vec<u8>) -> Self {
        Self {
            data: digest,
            digest: PhantomData,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u8> {
        self.data.iter()
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.data.clone()
    }

    /// 字节长度
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `Output`字节长度超过`N`会截断输出低`N`字节, `Output`字节长度小于`N`高字节会补0.
    pub fn to_array<const N: usize>(&self) -> [u8; N] {
        let mut arr = [0u8; N];

        match self.len().cmp(&N) {
            std::cmp::Ordering::Less => arr[(N - self.len())..].copy_from_slice(&self.data),
            std::cmp::Ordering::Equal => arr.copy_from_slice(&self.data),
            std::cmp::Ordering::Greater => arr.copy_from_slice(&self.data[(self.len() - N)..]),
        }

        arr
    }
}

impl<T: Digest> Output<T> {
    /// 字节长度
    pub const fn bytes() -> usize {
        (<T>::DIGEST_BITS + 7) >> 3
    }

    /// 位长度
    pub const fn bits() -> usize {
        <T>::DIGEST_BITS
    }
}

#[cfg(feature = "sec-zeroize")]
impl<T: ?Sized> Zeroize for Output<T> {
    fn zeroize(&mut self) {
        self.data.zeroize();
    }
}

impl<T: ?Sized> AsRef<[u8]> for Output<T> {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// `N`必须和`Output::<T>::bytes()`匹配, 否则会返回`HashError`.
impl<T: Digest, const N: usize> TryFrom<Output<T>> for [u8; N] {
    type Error = HashError;

    fn try_from(value: Output<T>) -> Result<Self, Self::Error> {
        value
            .data
            .as_slice()
            .try_into()
            .map_err(|_| HashError::MismatchingByteLen {
                target: N,
                real: value.len(),
            })
    }
}

impl<T: ?Sized> From<Output<T>> for Vec<u8> {
    fn from(value: Output<T>) -> Self {
        value.data
    }
}

/// 以小写16进制输出
impl<T: ?Sized> Display for Output<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        LowerHex::fmt(self, f)
    }
}

impl<T: ?Sized> LowerHex for Output<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        for &b in self.data.iter() {
            f.write_fmt(format_args!("{:02x}", b))?;
        }

        Ok(())
    }
}

impl<T: ?Sized> UpperHex for Output<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            f.write_str("0X")?;
        }
        for &b in self.data.iter() {
            f.write_fmt(format_args!("{:02X}", b))?;
        }

        Ok(())
    }
}
