use crate::CipherError;

pub trait BlockPadding {
    /// 对齐到`block_size`字节长度
    fn new(block_size: usize) -> Self;

    fn padding(&self, buf: &mut Vec<u8>);

    fn unpadding(&self, buf: &mut Vec<u8>) -> Result<(), CipherError>;

    /// 最长补几个块
    fn max_padding_blocks(&self) -> usize;
}

/// PKCS#7: 填充`n`个值为`n`的字节, `1 <= n <= block_size`. <br>
/// 数据已对齐时补充一个完整的分组, 因此填充总是存在. <br>
/// 分组大小为8时即PKCS#5.
#[derive(Copy, Clone, Debug)]
pub struct PKCS7Padding {
    block_size: usize,
}

pub type PKCS5Padding = PKCS7Padding;

impl BlockPadding for PKCS7Padding {
    fn new(block_size: usize) -> Self {
        Self { block_size }
    }

    fn padding(&self, buf: &mut Vec<u8>) {
        let n = self.block_size - (buf.len() % self.block_size);
        buf.resize(buf.len() + n, n as u8);
    }

    fn unpadding(&self, buf: &mut Vec<u8>) -> Result<(), CipherError> {
        let n = buf.last().copied().ok_or(CipherError::InvalidPadding)? as usize;

        if n == 0 || n > self.block_size || n > buf.len() {
            return Err(CipherError::InvalidPadding);
        }

        if buf[(buf.len() - n)..].iter().any(|&x| x as usize != n) {
            return Err(CipherError::InvalidPadding);
        }

        buf.truncate(buf.len() - n);
        Ok(())
    }

    fn max_padding_blocks(&self) -> usize {
        1
    }
}

/// 不填充, 由调用者保证数据是分组大小的整数倍
#[derive(Copy, Clone, Debug)]
pub struct EmptyPadding;

impl BlockPadding for EmptyPadding {
    fn new(_block_size: usize) -> Self {
        Self
    }

    fn padding(&self, _buf: &mut Vec<u8>) {}

    fn unpadding(&self, _buf: &mut Vec<u8>) -> Result<(), CipherError> {
        Ok(())
    }

    fn max_padding_blocks(&self) -> usize {
        0
    }
}
