use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortlyError {
    Validation(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    AliasExists(String),
    NotFound(String),
}

impl ShortlyError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ShortlyError::Validation(_) => "E001",
            ShortlyError::DatabaseConnection(_) => "E002",
            ShortlyError::DatabaseOperation(_) => "E003",
            ShortlyError::AliasExists(_) => "E004",
            ShortlyError::NotFound(_) => "E005",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ShortlyError::Validation(_) => "Validation Error",
            ShortlyError::DatabaseConnection(_) => "Database Connection Error",
            ShortlyError::DatabaseOperation(_) => "Database Operation Error",
            ShortlyError::AliasExists(_) => "Alias Already Exists",
            ShortlyError::NotFound(_) => "Resource Not Found",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ShortlyError::Validation(msg) => msg,
            ShortlyError::DatabaseConnection(msg) => msg,
            ShortlyError::DatabaseOperation(msg) => msg,
            ShortlyError::AliasExists(msg) => msg,
            ShortlyError::NotFound(msg) => msg,
        }
    }
}

impl fmt::Display for ShortlyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for ShortlyError {}

// 便捷的构造函数
impl ShortlyError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ShortlyError::Validation(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        ShortlyError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        ShortlyError::DatabaseOperation(msg.into())
    }

    pub fn alias_exists<T: Into<String>>(msg: T) -> Self {
        ShortlyError::AliasExists(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ShortlyError::NotFound(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<rusqlite::Error> for ShortlyError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                ShortlyError::AliasExists(err.to_string())
            }
            _ => ShortlyError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<r2d2::Error> for ShortlyError {
    fn from(err: r2d2::Error) -> Self {
        ShortlyError::DatabaseConnection(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShortlyError>;
