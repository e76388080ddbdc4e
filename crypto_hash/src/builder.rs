use crate::{Digest, HashError, Output, HMAC, SM3};
use std::convert::TryFrom;
use utils::Block;

macro_rules! impl_hasher_type {
    ($NAME: ident, $([$ITEM: tt $(=$VAL: literal)?]),+) => {
        #[repr(u32)]
        #[derive(Copy, Clone, Eq, PartialEq, Debug)]
        pub enum $NAME {
            $($ITEM $(=$VAL)?,)+
        }

        impl TryFrom<u32> for $NAME {
            type Error = HashError;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                match value {
                    $(x if x == Self::$ITEM as u32 => Ok(Self::$ITEM),)+
                    _ => {Err(HashError::UnsupportedMode(format!("{:#x} is not valid HasherType value", value)))},
                }
            }
        }

    };
}

impl_hasher_type!(HasherType, [SM3 = 0x10], [HMACSM3]);

/// 按`HasherType`选择纯摘要或HMAC, HMAC模式需通过`key`指定密钥.
#[derive(Clone)]
pub struct HasherBuilder {
    hasher: HasherType,
    key: Option<Block>,
}

impl From<HasherType> for HasherBuilder {
    fn from(value: HasherType) -> Self {
        Self::new(value)
    }
}

impl HasherBuilder {
    pub fn new(hasher_type: HasherType) -> Self {
        Self {
            hasher: hasher_type,
            key: None,
        }
    }

    /// HMAC密钥, 对纯摘要模式不起作用
    pub fn key(mut self, key: &[u8]) -> Self {
        self.key = Some(Block::from(key));
        self
    }

    pub fn hasher_type(&self) -> HasherType {
        self.hasher
    }

    pub fn digest(&self, msg: &[u8]) -> Result<Output<SM3>, HashError> {
        match self.hasher {
            HasherType::SM3 => Ok(SM3::digest(msg)),
            HasherType::HMACSM3 => {
                let key = self.key.as_ref().ok_or(HashError::MissingHmacKey)?;
                Ok(HMAC::<SM3>::new(key).mac(msg))
            }
        }
    }
}
