use crate::Result;
use crate::error::CheckError;
use crate::runner::{DEFAULT_SUITE_NAME, SuiteOptions};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// 套件配置：名称 + 选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    pub name: String,
    pub options: SuiteOptions,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SUITE_NAME.to_string(),
            options: SuiteOptions::default(),
        }
    }
}

/// 配置文件的原始形状，`name` 先以任意 TOML 值读入再校验
#[derive(Deserialize)]
struct RawConfig {
    name: Option<toml::Value>,

    #[serde(flatten)]
    options: SuiteOptions,
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "checkup.toml";

    /// 解析 TOML 文本
    pub fn from_toml_str(content: &str) -> Result<SuiteConfig> {
        let raw: RawConfig = toml::from_str(content)?;

        let name = match raw.name {
            None => DEFAULT_SUITE_NAME.to_string(),
            Some(toml::Value::String(name)) => name,
            Some(other) => return Err(CheckError::suite_name_must_be_string(other.type_str())),
        };

        Ok(SuiteConfig {
            name,
            options: raw.options,
        })
    }

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<SuiteConfig> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.as_ref().display(), suite = %config.name, "config loaded");
        Ok(config)
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录及其父目录
    /// 2. 用户配置目录 ~/.config/checkup/
    ///
    /// 没有找到配置文件时返回 `Ok(None)`；找到但内容无效时返回错误。
    pub fn find_and_load() -> Result<Option<SuiteConfig>> {
        let current = std::env::current_dir()?;
        let user_dir = dirs::home_dir().map(|home| home.join(".config").join("checkup"));
        Self::find_and_load_from(&current, user_dir.as_deref())
    }

    /// 从 `start` 向上查找，找不到再查看 `user_dir`
    pub fn find_and_load_from(
        start: &Path,
        user_dir: Option<&Path>,
    ) -> Result<Option<SuiteConfig>> {
        let Some(path) = Self::find_in_ancestors(start).or_else(|| Self::find_in_dir(user_dir?))
        else {
            tracing::debug!(start = %start.display(), "no config file found");
            return Ok(None);
        };

        Self::load_from_path(&path).map(Some)
    }

    fn find_in_ancestors(start: &Path) -> Option<PathBuf> {
        start.ancestors().find_map(Self::find_in_dir)
    }

    fn find_in_dir(dir: &Path) -> Option<PathBuf> {
        let config_path = dir.join(Self::CONFIG_FILE);
        config_path.is_file().then_some(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_from_toml_str() {
        let config = ConfigLoader::from_toml_str(
            r#"
name = "math"
quiet = true
print_report_banner = false
"#,
        )
        .unwrap();

        assert_eq!(config.name, "math");
        assert!(config.options.quiet);
        assert!(!config.options.print_report_banner);
        assert!(config.options.print_report_summary);
    }

    #[test]
    fn test_missing_name_uses_placeholder() {
        let config = ConfigLoader::from_toml_str("color = false").unwrap();
        assert_eq!(config.name, DEFAULT_SUITE_NAME);
        assert!(!config.options.color);
    }

    #[test]
    fn test_non_string_name_is_rejected() {
        let err = ConfigLoader::from_toml_str("name = 42").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigValidation);
        assert_eq!(
            err.to_string(),
            "test suite name must be a string (got integer)"
        );
    }

    #[test]
    fn test_load_from_path() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"name = \"from file\"\nprint_errors_on_test = true\n")
            .unwrap();
        temp_file.flush().unwrap();

        let config = ConfigLoader::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.name, "from file");
        assert!(config.options.print_errors_on_test);
    }

    #[test]
    fn test_find_prefers_ancestors_over_user_dir() {
        let project = TempDir::new().unwrap();
        let nested = project.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(project.path().join(ConfigLoader::CONFIG_FILE), "name = \"project\"").unwrap();

        let user_dir = TempDir::new().unwrap();
        fs::write(user_dir.path().join(ConfigLoader::CONFIG_FILE), "name = \"user\"").unwrap();

        let config = ConfigLoader::find_and_load_from(&nested, Some(user_dir.path()))
            .unwrap()
            .unwrap();
        assert_eq!(config.name, "project");
    }

    #[test]
    fn test_find_falls_back_to_user_dir() {
        let project = TempDir::new().unwrap();
        let user_dir = TempDir::new().unwrap();
        fs::write(user_dir.path().join(ConfigLoader::CONFIG_FILE), "name = \"user\"").unwrap();

        let config = ConfigLoader::find_and_load_from(project.path(), Some(user_dir.path()))
            .unwrap()
            .unwrap();
        assert_eq!(config.name, "user");

        let nothing = ConfigLoader::find_and_load_from(project.path(), None).unwrap();
        assert!(nothing.is_none());
    }

    #[test]
    fn test_find_reports_invalid_config() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join(ConfigLoader::CONFIG_FILE), "name = 42\nquiet = true\n").unwrap();

        let err = ConfigLoader::find_and_load_from(project.path(), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigValidation);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConfigLoader::load_from_path("/definitely/not/here/checkup.toml").unwrap_err();
        assert!(matches!(err, CheckError::ConfigRead(_)));
    }
}
