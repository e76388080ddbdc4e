use chrono::{DateTime, Local};
use std::{process::Command, time::SystemTime};

fn exe_cmd(cmd: &mut Command) -> anyhow::Result<String> {
    let output = cmd.output()?;

    anyhow::ensure!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(String::from_utf8(output.stdout)?)
}

fn main() {
    let git_commit_hash = match exe_cmd(Command::new("git").args([
        "log",
        "-n",
        "1",
        "--pretty=format:%H",
    ])) {
        Ok(s) => s[..8.min(s.len())].trim().to_string(),
        Err(e) => {
            println!("cargo:warning=git log run failed: {}", e.to_string().trim());
            String::from("unknown")
        }
    };

    println!(
        "cargo:rustc-env=GMSM_VERSION_INFO={}-{}-{}",
        env!("CARGO_PKG_VERSION"),
        git_commit_hash,
        DateTime::<Local>::from(SystemTime::now()).format("%Y/%m/%d-%H:%M:%S")
    );
}
