use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use cipher::{CipherType, Direction, PaddingType};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

use super::args::{IVArgs, InputArgs, KeyArgs};
use super::config::GmConfig;
use super::to_hex_string;
use crate::GmError;

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[value(name = "ecb", help = "The Electronic Codebook Mode")]
    ECB,
    #[value(name = "cbc", help = "The Cipher Block Chaining Mode, need the initial vector")]
    CBC,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Debug, Serialize, Deserialize)]
pub enum Pad {
    #[value(name = "pkcs7")]
    #[serde(rename = "pkcs7")]
    PKCS7,
    #[value(name = "pkcs5", help = "same as pkcs7")]
    #[serde(rename = "pkcs5")]
    PKCS5,
    #[value(name = "none", help = "no padding, the data size must be a multiple of 16")]
    #[serde(rename = "none")]
    NoPadding,
}

impl From<Mode> for CipherType {
    fn from(value: Mode) -> Self {
        match value {
            Mode::ECB => CipherType::ECB,
            Mode::CBC => CipherType::CBC,
        }
    }
}

impl From<Pad> for PaddingType {
    fn from(value: Pad) -> Self {
        match value {
            Pad::PKCS7 => PaddingType::PKCS7,
            Pad::PKCS5 => PaddingType::PKCS5,
            Pad::NoPadding => PaddingType::EmptyPadding,
        }
    }
}

#[derive(Args, Clone, Debug)]
#[command(mut_group("key", |g| g.required(true)), mut_group("iv", |g| g.required(false)))]
#[command(about = "SM4 cipher(PIPE | STRING | --hex | --file)")]
pub struct CryptoArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub key: KeyArgs,

    #[command(flatten)]
    pub iv: IVArgs,

    #[arg(value_enum, short, long)]
    #[arg(help = "the working mode, default from the config")]
    pub mode: Option<Mode>,

    #[arg(value_enum, long)]
    #[arg(help = "the padding, default from the config")]
    pub pad: Option<Pad>,

    #[arg(short, long, help = "enable decrypt")]
    pub decrypt: bool,

    #[arg(short, long)]
    #[arg(help = "write the raw output to the file")]
    pub ofile: Option<PathBuf>,

    #[arg(long = "hex-out", help = "display the decrypted data in hex")]
    pub hex_out: bool,
}

impl CryptoArgs {
    pub const NAME: &'static str = "sm4";

    pub fn direction(&self) -> Direction {
        if self.decrypt {
            Direction::Decrypt
        } else {
            Direction::Encrypt
        }
    }

    pub fn transform(&self, pipe: Option<&[u8]>) -> Result<Vec<u8>, GmError> {
        let config = GmConfig::config();
        let (mode, pad) = (
            self.mode.unwrap_or(config.mode),
            self.pad.unwrap_or(config.padding),
        );

        let data = self.input.read(pipe)?;
        let key = self.key.key()?.unwrap_or_else(|| Vec::new().into());
        let iv = self.iv.iv()?;
        log::debug!(
            "sm4 {:?} {:?} {:?}, data {} bytes",
            self.direction(),
            mode,
            pad,
            data.len()
        );

        Ok(cipher::transform(
            &data,
            &key,
            self.direction(),
            mode.into(),
            pad.into(),
            iv.as_deref(),
        )?)
    }

    /// 加密结果以16进制显示, 解密结果按UTF-8显示
    pub fn render(&self, out: Vec<u8>) -> Result<String, GmError> {
        let config = GmConfig::config();

        if self.decrypt && !self.hex_out {
            Ok(String::from_utf8(out)?)
        } else {
            Ok(to_hex_string(&out, config.prefix, config.uppercase))
        }
    }

    pub fn exe(self, pipe: Option<&[u8]>) -> anyhow::Result<()> {
        let out = self.transform(pipe)?;

        if let Some(p) = self.ofile.as_ref() {
            let f = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(p)?;
            let mut ostream = BufWriter::with_capacity(GmConfig::config().io_buf_size, f);
            ostream.write_all(&out)?;
            ostream.flush()?;
            log::info!("write {} bytes to `{}`", out.len(), p.display());
        } else {
            println!("{}", self.render(out)?);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CryptoArgs, Mode, Pad};
    use crate::cmd::args::{IVArgs, InputArgs, Key, KeyArgs};
    use crate::GmError;
    use cipher::CipherError;

    fn sm4_args(input: InputArgs, key: &str, iv: Option<&str>, mode: Mode) -> CryptoArgs {
        CryptoArgs {
            input,
            key: KeyArgs {
                kfile: None,
                kstr: Some(key.parse::<Key>().unwrap()),
            },
            iv: IVArgs {
                ivfile: None,
                ivstr: iv.map(|x| x.parse::<Key>().unwrap()),
            },
            mode: Some(mode),
            pad: Some(Pad::PKCS7),
            decrypt: false,
            ofile: None,
            hex_out: false,
        }
    }

    #[test]
    fn sm4_cmd_cbc() {
        let msg = "臂上妆犹在，襟间泪尚盈。";
        let ct = "bf484cb9ee733cea62377187ba0cd6cd522a4941ba87a73e4632fc706a6c3860a00c029d50f611a333d37a6eb73ccc6d";
        let (key, iv) = (
            "fa4f311bd2765bb23f4b328a0001ac00",
            Some("32ef4500ad3ecb2a34dcb09aac34bfea"),
        );

        let input = InputArgs {
            msg: Some(msg.to_string()),
            ..Default::default()
        };
        let args = sm4_args(input, key, iv, Mode::CBC);
        let out = args.transform(None).unwrap();
        assert_eq!(out, hex::decode(ct).unwrap());
        assert_eq!(args.render(out).unwrap(), ct);

        let input = InputArgs {
            hex: Some(ct.to_string()),
            ..Default::default()
        };
        let mut args = sm4_args(input, key, iv, Mode::CBC);
        args.decrypt = true;
        let out = args.transform(None).unwrap();
        assert_eq!(args.render(out.clone()).unwrap(), msg);

        args.hex_out = true;
        assert_eq!(args.render(out).unwrap(), hex::encode(msg.as_bytes()));
    }

    #[test]
    fn sm4_cmd_errors() {
        let args = sm4_args(InputArgs::default(), "0011", None, Mode::ECB);
        assert!(matches!(
            args.transform(None),
            Err(GmError::Cipher(CipherError::InvalidKeyLength {
                target: 16,
                real: 2
            }))
        ));

        let key = "fa4f311bd2765bb23f4b328a0001ac00";
        let args = sm4_args(InputArgs::default(), key, None, Mode::CBC);
        assert!(matches!(
            args.transform(None),
            Err(GmError::Cipher(CipherError::MissingIV))
        ));

        let mut args = sm4_args(InputArgs::default(), key, None, Mode::ECB);
        args.decrypt = true;
        assert!(matches!(
            args.transform(Some([0u8; 7].as_slice())),
            Err(GmError::Cipher(CipherError::InvalidBlockAlignment {
                block_size: 16,
                len: 7
            }))
        ));

        // 解密结果不是UTF-8
        let input = InputArgs {
            hex: Some("ff".to_string()),
            ..Default::default()
        };
        let args = sm4_args(input, key, None, Mode::ECB);
        let ct = args.transform(None).unwrap();
        let mut args = sm4_args(InputArgs::default(), key, None, Mode::ECB);
        args.decrypt = true;
        let pt = args.transform(Some(ct.as_slice())).unwrap();
        assert_eq!(pt, vec![0xff]);
        assert!(matches!(args.render(pt), Err(GmError::InvalidUtf8(_))));
    }
}
