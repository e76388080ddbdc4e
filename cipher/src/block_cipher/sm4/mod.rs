//! SM4分组密码<br>
//! [GB/T 32907-2016](https://openstd.samr.gov.cn/bzgk/gb/newGbInfo?hcno=7803DE42D3BC5E80B0C3E5D8E873D56A)<br>
//!
//! 分组长度和密钥长度均为128位, 32轮非线性迭代, 解密使用逆序的轮密钥.

mod const_;


use crate::{BlockDecrypt, BlockEncrypt, CipherError, Decrypt, Direction, Encrypt};
use const_::{CK, FK, SBOX};
use std::fmt::Debug;
use utils::Block;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

const BLOCK_SIZE: usize = 16;
const KEY_SIZE: usize = 16;
const ROUNDS: usize = 32;

/// 32个32位轮密钥
pub type RoundKeys = [u32; ROUNDS];

/// 同时持有加密和解密轮密钥
#[derive(Clone)]
pub struct SM4 {
    enc_keys: RoundKeys,
    dec_keys: RoundKeys,
}

impl SM4 {
    pub const KEY_SIZE: usize = KEY_SIZE;

    pub fn new(key: &[u8]) -> Result<Self, CipherError> {
        let enc_keys = Self::expand_key(key, Direction::Encrypt)?;
        let mut dec_keys = enc_keys;
        dec_keys.reverse();

        Ok(Self { enc_keys, dec_keys })
    }

    /// 密钥扩展: `K_{i+4} = K_i ^ T'(K_{i+1} ^ K_{i+2} ^ K_{i+3} ^ CK_i)`, `rk_i = K_{i+4}`.<br>
    /// `Direction::Decrypt`返回逆序的轮密钥.
    pub fn expand_key(key: &[u8], direction: Direction) -> Result<RoundKeys, CipherError> {
        let key = Block::as_arr_ref::<KEY_SIZE>(key).ok_or(CipherError::InvalidKeyLength {
            target: KEY_SIZE,
            real: key.len(),
        })?;

        let mut k = [0u32; 4];
        for ((w, chunk), fk) in k.iter_mut().zip(key.chunks_exact(4)).zip(FK) {
            *w = u32::from_be_bytes(Block::to_arr_uncheck(chunk)) ^ fk;
        }

        let mut round_keys = [0u32; ROUNDS];
        for (rk, ck) in round_keys.iter_mut().zip(CK) {
            *rk = k[0] ^ Self::l2(Self::tau(k[1] ^ k[2] ^ k[3] ^ ck));
            k = [k[1], k[2], k[3], *rk];
        }

        #[cfg(feature = "sec-zeroize")]
        k.zeroize();

        if direction == Direction::Decrypt {
            round_keys.reverse();
        }

        Ok(round_keys)
    }

    /// 使用轮密钥`round_keys`对一个分组做32轮变换, 输出为最后4个字的逆序.
    pub fn crypt_block(block: &[u8; BLOCK_SIZE], round_keys: &RoundKeys) -> [u8; BLOCK_SIZE] {
        let mut x = [0u32; 4];
        for (w, chunk) in x.iter_mut().zip(block.chunks_exact(4)) {
            *w = u32::from_be_bytes(Block::to_arr_uncheck(chunk));
        }

        for &rk in round_keys.iter() {
            let t = x[0] ^ Self::l1(Self::tau(x[1] ^ x[2] ^ x[3] ^ rk));
            x = [x[1], x[2], x[3], t];
        }

        let mut out = [0u8; BLOCK_SIZE];
        for (chunk, w) in out.chunks_exact_mut(4).zip(x.iter().rev()) {
            chunk.copy_from_slice(&w.to_be_bytes());
        }

        out
    }

    /// 非线性变换τ, 逐字节查S盒
    #[inline]
    fn tau(x: u32) -> u32 {
        u32::from_be_bytes(x.to_be_bytes().map(|b| SBOX[b as usize]))
    }

    #[inline]
    const fn l1(x: u32) -> u32 {
        x ^ x.rotate_left(2) ^ x.rotate_left(10) ^ x.rotate_left(18) ^ x.rotate_left(24)
    }

    #[inline]
    const fn l2(x: u32) -> u32 {
        x ^ x.rotate_left(13) ^ x.rotate_left(23)
    }
}

impl Debug for SM4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SM4").finish_non_exhaustive()
    }
}

#[cfg(feature = "sec-zeroize")]
impl Zeroize for SM4 {
    fn zeroize(&mut self) {
        self.enc_keys.zeroize();
        self.dec_keys.zeroize();
    }
}

#[cfg(feature = "sec-zeroize-drop")]
impl Drop for SM4 {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl BlockEncrypt<BLOCK_SIZE> for SM4 {
    fn encrypt_block(&self, plaintext: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        Self::crypt_block(plaintext, &self.enc_keys)
    }
}

impl BlockDecrypt<BLOCK_SIZE> for SM4 {
    fn decrypt_block(&self, ciphertext: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        Self::crypt_block(ciphertext, &self.dec_keys)
    }
}

impl Encrypt for SM4 {
    fn encrypt(&self, plaintext: &[u8], ciphertext: &mut Vec<u8>) -> Result<(), CipherError> {
        match Block::as_arr_ref(plaintext) {
            Some(block) => {
                ciphertext.extend(self.encrypt_block(block));
                Ok(())
            }
            None => Err(CipherError::InvalidBlockSize {
                target: BLOCK_SIZE,
                real: plaintext.len(),
            }),
        }
    }
}

impl Decrypt for SM4 {
    fn decrypt(&self, ciphertext: &[u8], plaintext: &mut Vec<u8>) -> Result<(), CipherError> {
        match Block::as_arr_ref(ciphertext) {
            Some(block) => {
                plaintext.extend(self.decrypt_block(block));
                Ok(())
            }
            None => Err(CipherError::InvalidBlockSize {
                target: BLOCK_SIZE,
                real: ciphertext.len(),
            }),
        }
    }
}
