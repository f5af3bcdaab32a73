use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文档读取相关错误
    #[error("文档错误: {0}")]
    Document(#[from] DocumentError),
    /// 目录（书签）结构错误
    #[error("目录错误: {0}")]
    Outline(#[from] OutlineError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 文档读取相关错误
#[derive(Debug, Error)]
pub enum DocumentError {
    /// 加载文档失败
    #[error("无法加载文档 ({path}): {source}")]
    LoadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 页码超出范围
    #[error("页码 {page} 超出范围 [1, {num_pages}]")]
    PageOutOfRange { page: u32, num_pages: u32 },
    /// 读取页面文本失败
    #[error("读取第 {page} 页失败: {source}")]
    PageFetch {
        page: u32,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 页面引用无法对应到页索引
    #[error("无效的页面引用: {reference}")]
    InvalidPageRef { reference: String },
    /// 命名目标在文档中不存在
    #[error("命名目标不存在: {name}")]
    UnknownDestination { name: String },
}

/// 目录（书签）结构错误
#[derive(Debug, Error)]
pub enum OutlineError {
    /// 目录中找不到章节
    #[error("找不到章节: {title}")]
    ChapterNotFound { title: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 序列化失败
    #[error("序列化失败 ({format}): {source}")]
    SerializeFailed {
        format: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 缺少必填项
    #[error("缺少配置项: {field}")]
    MissingField { field: String },
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::File(FileError::SerializeFailed {
            format: "json".to_string(),
            source: Box::new(err),
        })
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::File(FileError::SerializeFailed {
            format: "toml".to_string(),
            source: Box::new(err),
        })
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: String::new(), // TOML错误通常不包含路径信息
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建章节未找到错误
    pub fn chapter_not_found(title: impl Into<String>) -> Self {
        AppError::Outline(OutlineError::ChapterNotFound {
            title: title.into(),
        })
    }

    /// 创建页面读取错误
    pub fn page_fetch_failed(
        page: u32,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Document(DocumentError::PageFetch {
            page,
            source: Box::new(source),
        })
    }

    /// 创建文档加载错误
    pub fn document_load_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Document(DocumentError::LoadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 是否为"章节不存在"，批量处理时用于区分统计
    pub fn is_chapter_not_found(&self) -> bool {
        matches!(self, AppError::Outline(OutlineError::ChapterNotFound { .. }))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
