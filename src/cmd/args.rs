use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Args;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::GmError;

/// 消息数据来源, 在命令入口处一次性解析为字节
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Hex(String),
    File(PathBuf),
    Pipe(Vec<u8>),
}

impl Input {
    pub fn into_bytes(self) -> Result<Vec<u8>, GmError> {
        match self {
            Input::Text(s) => Ok(s.into_bytes()),
            Input::Hex(s) => decode_hex(&s),
            Input::File(p) => read_file(&p),
            Input::Pipe(d) => Ok(d),
        }
    }
}

#[derive(Args, Clone, Default, Debug)]
pub struct InputArgs {
    #[arg(value_name = "STRING")]
    #[arg(help = "the message string")]
    pub msg: Option<String>,

    #[arg(long, value_name = "HEX")]
    #[arg(help = "the message in hex")]
    pub hex: Option<String>,

    #[arg(short = 'f', long = "file")]
    #[arg(help = "the input file path")]
    pub ifile: Option<PathBuf>,
}

impl InputArgs {
    /// 只允许一个数据来源`<PIPE | STRING | --hex | --file>`, 都未指定时为空消息
    pub fn resolve(&self, pipe: Option<&[u8]>) -> Result<Input, GmError> {
        let datasource = pipe.is_some() as u8
            + self.msg.is_some() as u8
            + self.hex.is_some() as u8
            + self.ifile.is_some() as u8;
        if datasource > 1 {
            return Err(GmError::ConflictingInput);
        }

        let input = if let Some(p) = pipe {
            Input::Pipe(p.to_vec())
        } else if let Some(s) = self.msg.as_ref() {
            Input::Text(s.clone())
        } else if let Some(h) = self.hex.as_ref() {
            Input::Hex(h.clone())
        } else if let Some(f) = self.ifile.as_ref() {
            Input::File(f.clone())
        } else {
            Input::Text(String::new())
        };

        Ok(input)
    }

    pub fn read(&self, pipe: Option<&[u8]>) -> Result<Vec<u8>, GmError> {
        self.resolve(pipe)?.into_bytes()
    }
}

#[derive(Args, Clone, Debug)]
#[group(required = false, multiple = false, id = "key")]
pub struct KeyArgs {
    #[arg(long, group = "key")]
    #[arg(help = "the key file path")]
    pub kfile: Option<PathBuf>,

    #[arg(long, group = "key", value_name = "HEX")]
    #[arg(help = "the key in hex")]
    pub kstr: Option<Key>,
}

#[derive(Args, Clone, Debug)]
#[group(required = true, multiple = false, id = "iv")]
pub struct IVArgs {
    #[arg(long, group = "iv")]
    #[arg(help = "the initial vector path")]
    pub ivfile: Option<PathBuf>,

    #[arg(long, group = "iv", value_name = "HEX")]
    #[arg(help = "the initial vector in hex")]
    pub ivstr: Option<IVector>,
}

/// 命令行给出的密钥原文, 使用后清零
#[derive(Zeroize, ZeroizeOnDrop, Clone)]
pub struct Key {
    key: Vec<u8>,
}

pub type IVector = Key;

impl Key {
    pub const fn new(key: Vec<u8>) -> Self {
        Self { key }
    }

    pub fn len(&self) -> usize {
        self.key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// 按16进制解码
    fn decode(&self) -> Result<Key, GmError> {
        let s = std::str::from_utf8(&self.key).map_err(|_| hex::FromHexError::InvalidStringLength)?;
        decode_hex(s).map(Key::new)
    }

    fn read_from(file: Option<&Path>, hex_str: Option<&Key>) -> Result<Option<Key>, GmError> {
        if let Some(f) = file {
            return read_file(f).map(|k| Some(Key::new(k)));
        }

        hex_str.map(|s| s.decode()).transpose()
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("Key({} bytes)", self.len()))
    }
}

impl KeyArgs {
    pub fn key(&self) -> Result<Option<Key>, GmError> {
        Key::read_from(self.kfile.as_deref(), self.kstr.as_ref())
    }
}

impl IVArgs {
    pub fn iv(&self) -> Result<Option<IVector>, GmError> {
        Key::read_from(self.ivfile.as_deref(), self.ivstr.as_ref())
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = Vec::from(s);
        Ok(Key::new(v))
    }
}

impl From<Vec<u8>> for Key {
    fn from(value: Vec<u8>) -> Self {
        Self { key: value }
    }
}

impl Deref for Key {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.key.as_slice()
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.key
    }
}

/// 允许`0x`前缀
pub fn decode_hex(s: &str) -> Result<Vec<u8>, GmError> {
    let s = s.trim();
    let s = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    Ok(hex::decode(s)?)
}

fn read_file(p: &Path) -> Result<Vec<u8>, GmError> {
    if !p.is_file() {
        return Err(GmError::PathNotExist(p.display().to_string()));
    }

    Ok(std::fs::read(p)?)
}

#[cfg(test)]
mod tests {
    use super::{decode_hex, Input, InputArgs, Key, KeyArgs};
    use crate::GmError;
    use std::path::PathBuf;

    #[test]
    fn input_resolve() {
        let args = InputArgs {
            msg: Some("abc".to_string()),
            ..Default::default()
        };
        assert_eq!(args.resolve(None).unwrap(), Input::Text("abc".to_string()));
        assert_eq!(args.read(None).unwrap(), b"abc");

        let args = InputArgs {
            hex: Some("0x616263".to_string()),
            ..Default::default()
        };
        assert_eq!(args.read(None).unwrap(), b"abc");

        let args = InputArgs::default();
        assert_eq!(args.read(Some(b"pipe")).unwrap(), b"pipe");
        assert_eq!(args.read(None).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn input_conflict() {
        let cases = [
            (
                InputArgs {
                    msg: Some("abc".to_string()),
                    hex: Some("00".to_string()),
                    ifile: None,
                },
                None,
            ),
            (
                InputArgs {
                    msg: Some("abc".to_string()),
                    ..Default::default()
                },
                Some(b"pipe".as_slice()),
            ),
            (
                InputArgs {
                    ifile: Some(PathBuf::from("Cargo.toml")),
                    hex: Some("00".to_string()),
                    ..Default::default()
                },
                None,
            ),
        ];

        for (i, (args, pipe)) in cases.into_iter().enumerate() {
            assert!(
                matches!(args.resolve(pipe), Err(GmError::ConflictingInput)),
                "case {i} failed"
            );
        }
    }

    #[test]
    fn input_file() {
        let path = std::env::temp_dir().join(format!("gmsm-input-{}.bin", std::process::id()));
        std::fs::write(&path, [0u8, 1, 2, 0xff]).unwrap();

        let args = InputArgs {
            ifile: Some(path.clone()),
            ..Default::default()
        };
        let data = args.read(None);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(data.unwrap(), vec![0u8, 1, 2, 0xff]);

        assert!(matches!(
            Input::File(path).into_bytes(),
            Err(GmError::PathNotExist(_))
        ));
    }

    #[test]
    fn hex_decode() {
        assert_eq!(decode_hex("abE1").unwrap(), vec![0xab, 0xe1]);
        assert_eq!(decode_hex(" 0XAB ").unwrap(), vec![0xab]);
        assert!(matches!(decode_hex("abc"), Err(GmError::InvalidHex(_))));
        assert!(matches!(decode_hex("zz"), Err(GmError::InvalidHex(_))));
    }

    #[test]
    fn key_args() {
        let args = KeyArgs {
            kfile: None,
            kstr: Some("abe12300985eef".parse::<Key>().unwrap()),
        };
        let key = args.key().unwrap().unwrap();
        assert_eq!(&key[..], &[0xab, 0xe1, 0x23, 0x00, 0x98, 0x5e, 0xef]);
        assert_eq!(format!("{:?}", key), "Key(7 bytes)");

        let args = KeyArgs {
            kfile: None,
            kstr: None,
        };
        assert!(args.key().unwrap().is_none());

        let args = KeyArgs {
            kfile: None,
            kstr: Some("xyz".parse::<Key>().unwrap()),
        };
        assert!(matches!(args.key(), Err(GmError::InvalidHex(_))));
    }
}
