use crate::error::{AppError, AppResult, ConfigError};
use crate::models::ChapterSelector;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 题库输出格式
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Toml,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Toml => "toml",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "toml" => Some(OutputFormat::Toml),
            _ => None,
        }
    }
}

/// 程序配置
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 待处理的 PDF 路径
    pub pdf_path: String,
    /// 要提取的章节（标题或章节号）
    pub chapters: Vec<String>,
    /// 题库输出目录
    pub output_dir: String,
    /// 题库输出格式
    pub output_format: OutputFormat,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pdf_path: "uploads/book.pdf".to_string(),
            chapters: vec!["Chapter 1".to_string()],
            output_dir: "output_bank".to_string(),
            output_format: OutputFormat::Json,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            pdf_path: std::env::var("PDF_PATH").unwrap_or(default.pdf_path),
            chapters: std::env::var("CHAPTERS").ok().map(|v| split_chapters(&v)).unwrap_or(default.chapters),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            output_format: std::env::var("OUTPUT_FORMAT").ok().and_then(|v| OutputFormat::parse(&v)).unwrap_or(default.output_format),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 从 TOML 文件加载，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// 检查必填项
    pub fn validate(&self) -> AppResult<()> {
        if self.pdf_path.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "pdf_path".to_string(),
            }
            .into());
        }
        if self.chapter_selectors().is_empty() {
            return Err(ConfigError::MissingField {
                field: "chapters".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// 把配置中的章节条目转换为选择器，忽略空条目
    pub fn chapter_selectors(&self) -> Vec<ChapterSelector> {
        self.chapters
            .iter()
            .filter(|entry| !entry.trim().is_empty())
            .map(|entry| ChapterSelector::parse(entry))
            .collect()
    }
}

fn split_chapters(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
