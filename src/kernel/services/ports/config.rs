use serde::{Deserialize, Serialize};

pub const DEFAULT_AUTOSAVE_MS: u64 = 2000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// 入口文档候选名（不区分大小写），按顺序优先
    pub entry_names: Vec<String>,
    /// 扫描时整体跳过的依赖目录
    pub excluded_dirs: Vec<String>,
    pub html_extensions: Vec<String>,
    pub css_extensions: Vec<String>,
    pub js_extensions: Vec<String>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            entry_names: vec!["index.html".to_string()],
            excluded_dirs: vec![
                "node_modules".to_string(),
                "bower_components".to_string(),
                "jspm_packages".to_string(),
            ],
            html_extensions: vec!["html".to_string(), "htm".to_string()],
            css_extensions: vec!["css".to_string()],
            js_extensions: vec!["js".to_string()],
        }
    }
}

impl PreviewConfig {
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == name)
    }

    pub fn is_entry_name(&self, name: &str) -> bool {
        self.entry_names.iter().any(|e| e.eq_ignore_ascii_case(name))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// 自动保存的防抖间隔（毫秒）
    pub autosave_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            autosave_ms: DEFAULT_AUTOSAVE_MS,
        }
    }
}
