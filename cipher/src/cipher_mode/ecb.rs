//! ## The Electronic Codebook Mode(ECB)
//!
//! $$
//! C_j = Encrypt(P_j), j = 1...n
//!
//! P_j = Decrypt(C_j), j = 1...n
//! $$
//!
//! 给定的密钥, 每个明文块和密文块一一对应(如果不期待使用这一特性, 不应该使用ECB模式). <br>

use crate::cipher_mode::{check_block_alignment, BlockPadding};
use crate::{BlockDecrypt, BlockEncrypt, CipherError, Decrypt, Encrypt};
use utils::Block;

/// Electronic Codebook Mode(ECB)
pub struct ECB<P, E, const BLOCK_SIZE: usize> {
    cipher: E,
    padding: P,
}

impl<P, E, const N: usize> ECB<P, E, N>
where
    P: BlockPadding,
{
    pub fn new(cipher: E) -> Self {
        Self {
            cipher,
            padding: P::new(N),
        }
    }
}

impl<P, E, const N: usize> Encrypt for ECB<P, E, N>
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
        for chunk in buf.chunks_exact(N) {
            let block = Block::to_arr_uncheck(chunk);
            ciphertext.extend(self.cipher.encrypt_block(&block));
        }

        Ok(())
    }
}

impl<P, E, const N: usize> Decrypt for ECB<P, E, N>
where
    E: BlockDecrypt<N>,
    P: BlockPadding,
{
    fn decrypt(&self, ciphertext: &[u8], plaintext: &mut Vec<u8>) -> Result<(), CipherError> {
        check_block_alignment(ciphertext.len(), N)?;

        let mut buf = Block::with_capacity(ciphertext.len());
        for chunk in ciphertext.chunks_exact(N) {
            let block = Block::to_arr_uncheck(chunk);
            buf.extend(self.cipher.decrypt_block(&block));
        }
        self.padding.unpadding(buf.as_mut())?;

        plaintext.extend(buf.iter());
        Ok(())
    }
}
