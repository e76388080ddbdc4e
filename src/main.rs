use clap::{value_parser, Arg, ArgAction, Args, Command, FromArgMatches};
use gmsm::cmd::{config::GmConfig, CryptoArgs, HMACArgs, HashArgs};
use gmsm::log_error;
use log::LevelFilter;
use std::io::Read;
use std::path::PathBuf;

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let version = env!("GMSM_VERSION_INFO");
    let app = Command::new("gmsm")
        .version(version)
        .about("SM3 / HMAC-SM3 / SM4")
        .arg(
            Arg::new("pipe")
                .long("pipe")
                .short('p')
                .action(ArgAction::SetTrue)
                .required(false)
                .help("read the message from stdin"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .required(false)
                .help("the JSON config file"),
        )
        .subcommand(HashArgs::augment_args(Command::new(HashArgs::NAME)))
        .subcommand(HMACArgs::augment_args(Command::new(HMACArgs::NAME)))
        .subcommand(CryptoArgs::augment_args(Command::new(CryptoArgs::NAME)))
        .get_matches();

    let config = GmConfig::init(app.get_one::<PathBuf>("config").map(|p| p.as_path()));
    if log_error(config.map_err(anyhow::Error::from)).is_none() {
        std::process::exit(1);
    }

    let Some((s, m)) = app.subcommand() else {
        println!("{} {}", env!("CARGO_PKG_NAME"), version);
        return;
    };

    let mut pdata = Vec::with_capacity(1024);
    let pipe = if app.get_flag("pipe") {
        let len = std::io::stdin().lock().read_to_end(&mut pdata);
        if log_error(len.map_err(anyhow::Error::from)).is_none() {
            std::process::exit(1);
        }
        Some(pdata.as_slice())
    } else {
        None
    };

    let res = match s {
        HashArgs::NAME => HashArgs::from_arg_matches(m)
            .map_err(anyhow::Error::from)
            .and_then(|a| a.exe(pipe)),
        HMACArgs::NAME => HMACArgs::from_arg_matches(m)
            .map_err(anyhow::Error::from)
            .and_then(|a| a.exe(pipe)),
        CryptoArgs::NAME => CryptoArgs::from_arg_matches(m)
            .map_err(anyhow::Error::from)
            .and_then(|a| a.exe(pipe)),
        name => Err(anyhow::anyhow!("unsupport for {}", name)),
    };

    if log_error(res).is_none() {
        std::process::exit(1);
    }
}
