//! # Recommendation for Block Cipher Mode of Operation: Method and Techniques
//!
//! [NIST 800-38A, Recommendation for Block Cipher Modes of operation Methods and Techniques](https://nvlpubs.nist.gov/nistpubs/Legacy/SP/nistspecialpublication800-38a.pdf)<br>
//! [RFC 5652 §6.3, PKCS#7 Content-encryption Process](https://www.rfc-editor.org/rfc/rfc5652#section-6.3)<br>
//! <br>
//! 工作模式加密时先填充, 解密时最后去除填充; 填充后的数据长度不是分组大小的整数倍时返回`CipherError::InvalidBlockAlignment`. <br>
//! 输出追加写入, 不会清空调用者传入的缓冲区; 出错时缓冲区保持不变.

mod padding;
pub use padding::{BlockPadding, EmptyPadding, PKCS5Padding, PKCS7Padding};

mod ecb;
pub use ecb::ECB;

mod cbc;
pub use cbc::CBC;

use crate::{BlockCipherType, CipherBuilder, CipherError, CipherType, Direction, PaddingType};

pub(crate) fn check_block_alignment(len: usize, block_size: usize) -> Result<(), CipherError> {
    if len % block_size == 0 {
        Ok(())
    } else {
        Err(CipherError::InvalidBlockAlignment { block_size, len })
    }
}

/// SM4按工作模式`mode`和填充方式`padding`加密或解密`data`. <br>
/// `CipherType::CBC`必须提供16字节的`iv`, `CipherType::ECB`忽略`iv`.
pub fn transform(
    data: &[u8],
    key: &[u8],
    direction: Direction,
    mode: CipherType,
    padding: PaddingType,
    iv: Option<&[u8]>,
) -> Result<Vec<u8>, CipherError> {
    let cipher = CipherBuilder::new(BlockCipherType::SM4)
        .cipher_type(mode)
        .padding_type(padding)
        .build(key, iv)?;

    let mut out = Vec::with_capacity(data.len() + CipherBuilder::BLOCK_SIZE);
    match direction {
        Direction::Encrypt => cipher.encrypt(data, &mut out)?,
        Direction::Decrypt => cipher.decrypt(data, &mut out)?,
    }

    Ok(out)
}

/// `transform(plaintext, key, Direction::Encrypt, mode, padding, iv)`
pub fn encrypt(
    plaintext: &[u8],
    key: &[u8],
    mode: CipherType,
    padding: PaddingType,
    iv: Option<&[u8]>,
) -> Result<Vec<u8>, CipherError> {
    transform(plaintext, key, Direction::Encrypt, mode, padding, iv)
}

/// `transform(ciphertext, key, Direction::Decrypt, mode, padding, iv)`
pub fn decrypt(
    ciphertext: &[u8],
    key: &[u8],
    mode: CipherType,
    padding: PaddingType,
    iv: Option<&[u8]>,
) -> Result<Vec<u8>, CipherError> {
    transform(ciphertext, key, Direction::Decrypt, mode, padding, iv)
}
