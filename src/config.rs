use crate::error::{PatrolError, Result};
use mine_patrol_common::ShiftType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 本地设置
///
/// require_signature 是创建操作的策略开关（按配置生效，
/// 不硬编码在某个提交流程里）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub require_signature: bool,
    pub default_shift: ShiftType,
    pub default_area: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            require_signature: false,
            default_shift: ShiftType::Morning,
            default_area: "未分类".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        // 测试中通过环境变量重定向，避免污染真实配置
        if let Ok(dir) = std::env::var("MINE_PATROL_CONFIG_DIR") {
            return Ok(PathBuf::from(dir).join("config.json"));
        }
        let home = dirs::home_dir().ok_or_else(|| PatrolError::Config("找不到用户主目录".into()))?;
        Ok(home.join(".config").join("mine-patrol").join("config.json"))
    }

    pub fn set_require_signature(&mut self, value: bool) -> Result<()> {
        self.require_signature = value;
        self.save()
    }
}
