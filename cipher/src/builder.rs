use crate::cipher_mode::{EmptyPadding, PKCS7Padding, CBC, ECB};
use crate::{Cipher, CipherError, SM4};
use std::convert::TryFrom;
use utils::Block;

macro_rules! impl_cipher_type {
    ($NAME: ident, $TESTS: ident, $REPR: ty, $([$ITEM: tt $(=$VAL: literal)?]),+) => {
        #[repr($REPR)]
        #[derive(Copy, Clone, Eq, PartialEq, Debug)]
        pub enum $NAME {
            $($ITEM $(=$VAL)?,)+
        }

        impl TryFrom<$REPR> for $NAME {
            type Error = CipherError;

            fn try_from(value: $REPR) -> Result<Self, Self::Error> {
                match value {
                    $(x if x == Self::$ITEM as $REPR => Ok(Self::$ITEM),)+
                    _ => { Err(CipherError::UnsupportedMode(format!("{} is no valid {} value", value, stringify!($NAME)))) },
                }
            }
        }

        #[cfg(test)]
        mod $TESTS {
            use super::$NAME;

            #[test]
            fn check_cipher_type_repeat() {
                let mut x = [$($NAME::$ITEM as u64),+].to_vec();
                x.sort();
                let len1 = x.len();
                x.dedup();
                assert_eq!(len1, x.len());
            }
        }
    };
}

impl_cipher_type!(BlockCipherType, block_cipher_type_tests, u16, [SM4 = 0x1]);

impl_cipher_type!(
    PaddingType,
    padding_type_tests,
    u8,
    [EmptyPadding],
    [PKCS5],
    [PKCS7]
);

impl_cipher_type!(CipherType, cipher_type_tests, u16, [ECB = 0x3], [CBC]);

/// 按分组密码/工作模式/填充方式组合出`Cipher`, 未指定填充方式时使用PKCS#7.
#[derive(Clone)]
pub struct CipherBuilder {
    block_cipher_type: BlockCipherType,
    cipher_type: Option<CipherType>,
    padding_type: Option<PaddingType>,
}

impl CipherBuilder {
    pub const BLOCK_SIZE: usize = 16;

    pub fn new(block_cipher_type: BlockCipherType) -> Self {
        Self {
            block_cipher_type,
            cipher_type: None,
            padding_type: None,
        }
    }

    pub fn key_size(&self) -> usize {
        match self.block_cipher_type {
            BlockCipherType::SM4 => SM4::KEY_SIZE,
        }
    }

    pub fn cipher_type(mut self, cipher_type: CipherType) -> Self {
        self.cipher_type = Some(cipher_type);
        self
    }

    pub fn padding_type(mut self, padding_type: PaddingType) -> Self {
        self.padding_type = Some(padding_type);
        self
    }

    /// `CipherType::CBC`需要`iv`, 其它工作模式忽略`iv`.
    pub fn build(&self, key: &[u8], iv: Option<&[u8]>) -> Result<Box<dyn Cipher>, CipherError> {
        let cipher_type = self
            .cipher_type
            .ok_or_else(|| CipherError::UnsupportedMode("need to specify the cipher type".to_string()))?;
        let padding_type = self.padding_type.unwrap_or(PaddingType::PKCS7);

        let cipher = match self.block_cipher_type {
            BlockCipherType::SM4 => SM4::new(key)?,
        };

        match cipher_type {
            CipherType::ECB => {
                let ecb: Box<dyn Cipher> = match padding_type {
                    PaddingType::PKCS5 | PaddingType::PKCS7 => {
                        Box::new(ECB::<PKCS7Padding, SM4, 16>::new(cipher))
                    }
                    PaddingType::EmptyPadding => {
                        Box::new(ECB::<EmptyPadding, SM4, 16>::new(cipher))
                    }
                };
                Ok(ecb)
            }
            CipherType::CBC => {
                let iv = iv.ok_or(CipherError::MissingIV)?;
                let iv = Block::to_arr::<16>(iv).ok_or(CipherError::InvalidIVLength {
                    target: Self::BLOCK_SIZE,
                    real: iv.len(),
                })?;

                let cbc: Box<dyn Cipher> = match padding_type {
                    PaddingType::PKCS5 | PaddingType::PKCS7 => {
                        Box::new(CBC::<PKCS7Padding, SM4, 16>::new(cipher, iv))
                    }
                    PaddingType::EmptyPadding => {
                        Box::new(CBC::<EmptyPadding, SM4, 16>::new(cipher, iv))
                    }
                };
                Ok(cbc)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BlockCipherType, CipherBuilder, CipherType, PaddingType};
    use crate::CipherError;

    #[test]
    fn builder_build() {
        let key = hex::decode("0123456789abcdeffedcba9876543210").unwrap();
        let builder = CipherBuilder::new(BlockCipherType::SM4);
        assert_eq!(builder.key_size(), 16);

        let ecb = builder
            .clone()
            .cipher_type(CipherType::ECB)
            .padding_type(PaddingType::EmptyPadding)
            .build(&key, None)
            .unwrap();
        let mut c = Vec::new();
        ecb.encrypt(&key, &mut c).unwrap();
        assert_eq!(c, hex::decode("681edf34d206965e86b3e94f536e4246").unwrap());

        let cbc = builder
            .clone()
            .cipher_type(CipherType::CBC)
            .build(&key, Some([0u8; 16].as_slice()))
            .unwrap();
        let mut c2 = Vec::new();
        cbc.encrypt(&key, &mut c2).unwrap();
        // 全0的IV下第一个分组和ECB相同, 默认PKCS#7多出一个填充分组
        assert_eq!(c2.len(), 32);
        assert_eq!(c2[..16], c[..]);

        let mut p = Vec::new();
        cbc.decrypt(&c2, &mut p).unwrap();
        assert_eq!(p, key);

        assert!(matches!(
            builder.build(&key, None),
            Err(CipherError::UnsupportedMode(_))
        ));
    }

    #[test]
    fn builder_type_from_repr() {
        assert_eq!(CipherType::try_from(0x3u16).unwrap(), CipherType::ECB);
        assert_eq!(CipherType::try_from(0x4u16).unwrap(), CipherType::CBC);
        assert_eq!(PaddingType::try_from(2u8).unwrap(), PaddingType::PKCS7);
        assert_eq!(BlockCipherType::try_from(1u16).unwrap(), BlockCipherType::SM4);

        assert!(matches!(
            CipherType::try_from(0x1u16),
            Err(CipherError::UnsupportedMode(_))
        ));
        assert!(matches!(
            PaddingType::try_from(9u8),
            Err(CipherError::UnsupportedMode(_))
        ));
    }
}
