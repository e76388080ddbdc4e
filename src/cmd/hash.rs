use clap::Args;
use crypto_hash::{HasherBuilder, HasherType, Output, SM3};

use super::args::{InputArgs, KeyArgs};
use super::config::GmConfig;
use crate::GmError;

#[derive(Args, Clone, Debug)]
#[command(about = "SM3 hash(PIPE | STRING | --hex | --file)")]
pub struct HashArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(long, help = "display prefix with `0x`")]
    pub prefix: bool,
}

#[derive(Args, Clone, Debug)]
#[command(about = "HMAC-SM3(PIPE | STRING | --hex | --file)")]
pub struct HMACArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub key: KeyArgs,

    #[arg(long, help = "display prefix with `0x`")]
    pub prefix: bool,
}

fn display_digest(d: &Output<SM3>, prefix: bool) -> String {
    let config = GmConfig::config();
    match (prefix || config.prefix, config.uppercase) {
        (true, true) => format!("{:#X}", d),
        (true, false) => format!("{:#x}", d),
        (false, true) => format!("{:X}", d),
        (false, false) => format!("{:x}", d),
    }
}

impl HashArgs {
    pub const NAME: &'static str = "sm3";

    pub fn digest(&self, pipe: Option<&[u8]>) -> Result<Output<SM3>, GmError> {
        let msg = self.input.read(pipe)?;
        log::debug!("sm3 message {} bytes", msg.len());

        Ok(HasherBuilder::new(HasherType::SM3).digest(&msg)?)
    }

    pub fn exe(self, pipe: Option<&[u8]>) -> anyhow::Result<()> {
        let d = self.digest(pipe)?;
        println!("{}", display_digest(&d, self.prefix));
        Ok(())
    }
}

impl HMACArgs {
    pub const NAME: &'static str = "hmac";

    pub fn mac(&self, pipe: Option<&[u8]>) -> Result<Output<SM3>, GmError> {
        let msg = self.input.read(pipe)?;
        let mut builder = HasherBuilder::new(HasherType::HMACSM3);
        if let Some(key) = self.key.key()? {
            log::debug!("hmac key {} bytes, message {} bytes", key.len(), msg.len());
            builder = builder.key(&key);
        }

        Ok(builder.digest(&msg)?)
    }

    pub fn exe(self, pipe: Option<&[u8]>) -> anyhow::Result<()> {
        let d = self.mac(pipe)?;
        println!("{}", display_digest(&d, self.prefix));
        Ok(())
    }
}
