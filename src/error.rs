use crate::utils::colors::strip_ansi;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// 生命周期违规：套件 API 被以错误的顺序调用
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleViolation {
    #[error("Cannot modify test suite '{suite}' (testing has already begun)")]
    ModifyAfterStarted { suite: String },

    #[error("Cannot add test '{test}' (testing has already begun)")]
    AddAfterFinished { test: String },

    #[error("Cannot calculate results (no tests exist)")]
    NoTestsRun,

    #[error("Cannot calculate results (results have already been generated)")]
    ResultsAlreadyCalculated,

    #[error("Cannot retrieve report (results have not been generated)")]
    ReportNotReady,
}

/// checkup 的错误类型
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("{0}")]
    ConfigValidation(String),

    #[error("failed to read config file: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleViolation),

    /// 断言未通过
    #[error("{0}")]
    AssertionFailure(String),

    /// 断言被误用（回调不是函数、期望错误的形状不对）
    #[error("{0}")]
    AssertionUsage(String),
}

impl CheckError {
    /// 创建断言失败错误，消息中的颜色控制序列会被去除
    pub fn failure(message: impl AsRef<str>) -> Self {
        CheckError::AssertionFailure(strip_ansi(message.as_ref()))
    }

    /// 创建断言误用错误
    pub fn usage(message: impl AsRef<str>) -> Self {
        CheckError::AssertionUsage(strip_ansi(message.as_ref()))
    }

    pub fn suite_name_must_be_string(type_name: &str) -> Self {
        CheckError::ConfigValidation(format!(
            "test suite name must be a string (got {})",
            strip_ansi(type_name)
        ))
    }

    pub fn modify_after_started(suite: &str) -> Self {
        LifecycleViolation::ModifyAfterStarted {
            suite: strip_ansi(suite),
        }
        .into()
    }

    pub fn add_after_finished(test: &str) -> Self {
        LifecycleViolation::AddAfterFinished {
            test: strip_ansi(test),
        }
        .into()
    }

    /// 错误所属的类别
    pub fn kind(&self) -> ErrorKind {
        match self {
            CheckError::ConfigValidation(_)
            | CheckError::ConfigRead(_)
            | CheckError::ConfigParse(_) => ErrorKind::ConfigValidation,
            CheckError::Lifecycle(_) => ErrorKind::LifecycleViolation,
            CheckError::AssertionFailure(_) => ErrorKind::AssertionFailure,
            CheckError::AssertionUsage(_) => ErrorKind::AssertionUsage,
        }
    }

    /// 是否为生命周期违规
    pub fn lifecycle(&self) -> Option<&LifecycleViolation> {
        match self {
            CheckError::Lifecycle(violation) => Some(violation),
            _ => None,
        }
    }
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    ConfigValidation,
    LifecycleViolation,
    AssertionFailure,
    AssertionUsage,
    /// 测试体抛出的非 checkup 错误或 panic
    Uncaught,
}

impl ErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::ConfigValidation | ErrorKind::LifecycleViolation => "TestError",
            ErrorKind::AssertionFailure => "AssertionFailure",
            ErrorKind::AssertionUsage => "AssertionError",
            ErrorKind::Uncaught => "Error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 源码位置（文件名 + 行号）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// 记录在测试结果中的结构化错误
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredError {
    kind: ErrorKind,
    message: String,
    location: Option<Location>,
}

impl StructuredError {
    pub fn new(kind: ErrorKind, message: impl AsRef<str>) -> Self {
        Self {
            kind,
            message: strip_ansi(message.as_ref()),
            location: None,
        }
    }

    pub fn with_location(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn is_assertion_failure(&self) -> bool {
        self.kind == ErrorKind::AssertionFailure
    }

    /// `<类别>: <消息>` 形式的描述
    pub fn describe(&self) -> String {
        format!("{}: {}", self.kind, self.message)
    }
}

impl From<&CheckError> for StructuredError {
    fn from(err: &CheckError) -> Self {
        StructuredError::new(err.kind(), err.to_string())
    }
}

impl From<CheckError> for StructuredError {
    fn from(err: CheckError) -> Self {
        StructuredError::from(&err)
    }
}

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StructuredError {}

/// Result type for checkup crate
pub type Result<T> = std::result::Result<T, CheckError>;
