use std::path::Path;
use std::sync::OnceLock;

use config::Config;
use serde::{Deserialize, Serialize};

use super::crypto::{Mode, Pad};
use crate::GmError;

static CONFIG: OnceLock<GmConfig> = OnceLock::new();

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
pub struct GmConfig {
    // 未指定`-m`时的工作模式
    pub mode: Mode,

    // 未指定`--pad`时的填充方式
    pub padding: Pad,

    // 16进制输出带`0x`前缀
    pub prefix: bool,

    pub uppercase: bool,

    // byte size
    pub io_buf_size: usize,
}

impl Default for GmConfig {
    fn default() -> Self {
        Self {
            mode: Mode::ECB,
            padding: Pad::PKCS7,
            prefix: false,
            uppercase: false,
            io_buf_size: 8 * 1024,
        }
    }
}

impl GmConfig {
    /// 环境变量`GMSM_UPPERCASE`, 嵌套字段以`__`分隔
    fn environment() -> config::Environment {
        config::Environment::with_prefix("GMSM")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// 默认值 < 配置文件`f` < 环境变量`GMSM_*`
    pub fn load(f: Option<&Path>) -> Result<Self, GmError> {
        Self::load_with_env(f, Self::environment())
    }

    fn load_with_env(f: Option<&Path>, env: config::Environment) -> Result<Self, GmError> {
        let default_config = Config::try_from(&GmConfig::default())?;

        let mut config = Config::builder().add_source(default_config);

        if let Some(f) = f {
            if !f.is_file() {
                return Err(GmError::PathNotExist(f.display().to_string()));
            }
            config = config.add_source(config::File::from(f).format(config::FileFormat::Json));
        }

        let mut gmconfig: GmConfig = config.add_source(env).build()?.try_deserialize()?;
        gmconfig.io_buf_size = gmconfig.io_buf_size.max(1);

        log::trace!(
            "config: {}",
            serde_json::to_string(&gmconfig).unwrap_or_default()
        );

        Ok(gmconfig)
    }

    /// 只有第一次调用生效
    pub fn init(f: Option<&Path>) -> Result<&'static Self, GmError> {
        if let Some(c) = CONFIG.get() {
            return Ok(c);
        }

        let c = Self::load(f)?;
        Ok(CONFIG.get_or_init(|| c))
    }

    pub fn config() -> &'static Self {
        CONFIG.get_or_init(|| {
            Self::load(None).unwrap_or_else(|e| {
                log::warn!("{e}, use the default config");
                Self::default()
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::GmConfig;
    use crate::cmd::crypto::{Mode, Pad};
    use crate::GmError;

    // 不读取进程的环境变量
    fn env_from(vars: &[(&str, &str)]) -> config::Environment {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<config::Map<_, _>>();
        GmConfig::environment().source(Some(vars))
    }

    #[test]
    fn config_from_file() {
        let path = std::env::temp_dir().join(format!("gmsm-config-{}.json", std::process::id()));
        let s = serde_json::json!({
            "mode": "cbc",
            "padding": "none",
            "uppercase": true,
            "io_buf_size": 0,
        });
        std::fs::write(&path, s.to_string()).unwrap();

        let c = GmConfig::load_with_env(Some(path.as_path()), env_from(&[])).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(
            c,
            GmConfig {
                mode: Mode::CBC,
                padding: Pad::NoPadding,
                prefix: false,
                uppercase: true,
                io_buf_size: 1,
            }
        );
    }

    #[test]
    fn config_from_env() {
        let env = env_from(&[
            ("GMSM_UPPERCASE", "true"),
            ("GMSM_MODE", "cbc"),
            ("GMSM_IO_BUF_SIZE", "4096"),
            ("OTHER_PREFIX", "true"),
        ]);
        let c = GmConfig::load_with_env(None, env).unwrap();

        assert_eq!(
            c,
            GmConfig {
                mode: Mode::CBC,
                padding: Pad::PKCS7,
                prefix: false,
                uppercase: true,
                io_buf_size: 4096,
            }
        );
    }

    #[test]
    fn config_missing_file() {
        let path = std::env::temp_dir().join("gmsm-config-not-exist.json");
        assert!(matches!(
            GmConfig::load(Some(path.as_path())),
            Err(GmError::PathNotExist(_))
        ));
    }

    #[test]
    fn config_serde() {
        let c = GmConfig::default();
        let s = serde_json::to_string(&c).unwrap();
        assert!(s.contains(r#""mode":"ecb""#), "{s}");
        assert!(s.contains(r#""padding":"pkcs7""#), "{s}");
        assert_eq!(serde_json::from_str::<GmConfig>(&s).unwrap(), c);
    }
}
