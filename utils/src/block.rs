use std::ops::{Deref, DerefMut};
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// 字节缓冲区, 开启`sec-zeroize-drop`时释放前清零. 用于存放密钥相关的中间数据.
#[derive(Default, Clone, Debug)]
pub struct Block {
    data: Vec<u8>,
}

impl Block {
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// 填充`0x00`到`len`字节长度, 超过`len`时截断
    pub fn resize_zero(&mut self, len: usize) {
        self.data.resize(len, 0);
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn as_slice(&self) -> &[u8] {
        self.data.as_slice()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `data.len() != N`时返回`None`
    pub fn as_arr_ref<const N: usize>(data: &[u8]) -> Option<&[u8; N]> {
        data.try_into().ok()
    }

    /// `data.len() != N`时返回`None`
    pub fn to_arr<const N: usize>(data: &[u8]) -> Option<[u8; N]> {
        data.try_into().ok()
    }

    /// 取`data`的前`N`字节, 不足`N`字节时末尾补0.
    pub fn to_arr_uncheck<const N: usize>(data: &[u8]) -> [u8; N] {
        let mut arr = [0u8; N];
        let n = N.min(data.len());
        arr[..n].copy_from_slice(&data[..n]);
        arr
    }
}

/// `dst[i] ^= src[i]`, 长度取两者较小值
pub fn xor_into(dst: &mut [u8], src: &[u8]) {
    dst.iter_mut().zip(src.iter()).for_each(|(a, b)| *a ^= b);
}

impl AsRef<[u8]> for Block {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl AsMut<Vec<u8>> for Block {
    fn as_mut(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }
}

impl Deref for Block {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.data.as_slice()
    }
}

impl DerefMut for Block {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.data.as_mut_slice()
    }
}

#[cfg(feature = "sec-zeroize")]
impl Zeroize for Block {
    fn zeroize(&mut self) {
        self.data.zeroize();
    }
}

#[cfg(feature = "sec-zeroize-drop")]
impl Drop for Block {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl From<&[u8]> for Block {
    fn from(value: &[u8]) -> Self {
        Self {
            data: value.to_vec(),
        }
    }
}

impl From<Vec<u8>> for Block {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl<A> Extend<A> for Block
where
    Vec<u8>: Extend<A>,
{
    fn extend<T: IntoIterator<Item = A>>(&mut self, iter: T) {
        self.data.extend(iter)
    }
}
