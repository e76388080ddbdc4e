//! ## The Cipher Block Chaining Mode(CBC)
//!
//! 给定初始向量IV, IV可以不保密, 但是**它必须是不可预测的(unpredictable)**. <br>
//!
//! $$
//! C_1 = Encrypt(P_1 \xor IV); C_j = Encrypt(P_j \xor C_{j-1}), j = 2...n
//!
//! P_1 = Decrypt(C_1) \xor IV; P_j = Decrypt(C_j) \xor C_{j-1}, j = 2...n
//! $$
//!
//! 在CBC模式中, 加密每个明文块依赖前一个密文输出, 故Encrypt无法并行. 但Decrypt是可以并行的. <br>

use crate::cipher_mode::{check_block_alignment, BlockPadding};
use crate::{BlockDecrypt, BlockEncrypt, CipherError, Decrypt, Encrypt};
use utils::{xor_into, Block};

/// Cipher Block Chaining Mode(CBC) <br>
///
/// 每次加解密都从`self.iv`开始链接, 不会修改`self.iv`. 再次加密新的消息时应调用`self.set_iv`设置新的`IV`. <br>
pub struct CBC<P, E, const BLOCK_SIZE: usize> {
    /// 初始化向量
    iv: [u8; BLOCK_SIZE],
    cipher: E,
    padding: P,
}

impl<P, E, const N: usize> CBC<P, E, N>
where
    P: BlockPadding,
{
    pub fn new(cipher: E, iv: [u8; N]) -> Self {
        Self {
            iv,
            cipher,
            padding: P::new(N),
        }
    }

    pub fn set_iv(&mut self, iv: [u8; N]) {
        self.iv = iv;
    }
}

impl<P, E, const N: usize> Encrypt for CBC<P, E, N>
where
    E: BlockEncrypt<N>,
    P: BlockPadding,
{
    fn encrypt(&self, plaintext: &[u8], ciphertext: &mut Vec<u8>) -> Result<(), CipherError> {
        let mut buf = Block::with_capacity(plaintext.len() + N * self.padding.max_padding_blocks());
        buf.extend(plaintext);
        self.padding.padding(buf.as_mut());
        check_block_alignment(buf.len(), N)?;

        ciphertext.reserve(buf.len());
        let mut chain = self.iv;
        for chunk in buf.chunks_exact(N) {
            xor_into(&mut chain, chunk);
            chain = self.cipher.encrypt_block(&chain);
            ciphertext.extend(chain);
        }

        Ok(())
    }
}

impl<P, E, const N: usize> Decrypt for CBC<P, E, N>
where
    E: BlockDecrypt<N>,
    P: BlockPadding,
{
    fn decrypt(&self, ciphertext: &[u8], plaintext: &mut Vec<u8>) -> Result<(), CipherError> {
        check_block_alignment(ciphertext.len(), N)?;

        let mut buf = Block::with_capacity(ciphertext.len());
        let mut chain = self.iv;
        for chunk in ciphertext.chunks_exact(N) {
            let block = Block::to_arr_uncheck(chunk);
            let mut d = self.cipher.decrypt_block(&block);
            xor_into(&mut d, &chain);
            chain = block;
            buf.extend(d);
        }
        self.padding.unpadding(buf.as_mut())?;

        plaintext.extend(buf.iter());
        Ok(())
    }
}
