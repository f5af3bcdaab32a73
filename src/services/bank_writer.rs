//! 题库写入服务 - 业务能力层
//!
//! 只负责把单个章节的提取结果落盘，不关心流程

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::config::{Config, OutputFormat};
use crate::error::{AppError, AppResult};
use crate::models::ChapterExam;

/// 题库写入服务
///
/// 职责：
/// - 每个章节写一个文件 `<output_dir>/<slug>.{json,toml}`
/// - 目录不存在时自动创建
/// - 同名文件直接覆盖
pub struct BankWriter {
    output_dir: PathBuf,
    format: OutputFormat,
}

impl BankWriter {
    pub fn new(output_dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.output_dir, config.output_format)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 某章节结果将写入的路径
    pub fn path_for(&self, chapter_title: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", slugify(chapter_title), self.format.extension()))
    }

    /// 写入章节结果，返回文件路径
    pub async fn write(&self, exam: &ChapterExam) -> AppResult<PathBuf> {
        let content = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(exam)?,
            OutputFormat::Toml => toml::to_string_pretty(exam)?,
        };

        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| AppError::file_write_failed(self.output_dir.display().to_string(), e))?;

        let path = self.path_for(&exam.chapter_title);
        fs::write(&path, content)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        debug!("写入题库: {}", path.display());
        Ok(path)
    }
}

/// 章节标题 → 文件名：小写字母数字段以 `_` 连接
pub fn slugify(title: &str) -> String {
    let slug = title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_");

    if slug.is_empty() {
        "chapter".to_string()
    } else {
        slug
    }
}
