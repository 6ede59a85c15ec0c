use colored::{Color, Colorize};
use regex::Regex;
use std::sync::OnceLock;

/// 去除字符串中的 ANSI 颜色控制序列
pub fn strip_ansi(text: &str) -> String {
    static ANSI_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = ANSI_REGEX.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").unwrap());

    re.replace_all(text, "").to_string()
}

/// 为子串着色，`enabled` 为 false 时原样返回
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for Painter {
    fn default() -> Self {
        Self::new(true)
    }
}
