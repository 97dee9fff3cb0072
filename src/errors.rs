//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_hwproj_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum HwProjError {
            $($variant(String),)*
        }

        impl HwProjError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(HwProjError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(HwProjError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(HwProjError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl HwProjError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        HwProjError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_hwproj_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Serialization("E008", "Serialization Error"),
    DateParse("E009", "Date Parse Error"),
    Authentication("E010", "Authentication Error"),
    Authorization("E011", "Authorization Error"),
    EventPublish("E012", "Event Publish Error"),
}

impl HwProjError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for HwProjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for HwProjError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for HwProjError {
    fn from(err: sea_orm::DbErr) -> Self {
        HwProjError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for HwProjError {
    fn from(err: std::io::Error) -> Self {
        HwProjError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for HwProjError {
    fn from(err: serde_json::Error) -> Self {
        HwProjError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for HwProjError {
    fn from(err: chrono::ParseError) -> Self {
        HwProjError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HwProjError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(HwProjError::cache_connection("test").code(), "E001");
        assert_eq!(HwProjError::database_config("test").code(), "E003");
        assert_eq!(HwProjError::validation("test").code(), "E006");
        assert_eq!(HwProjError::authentication("test").code(), "E010");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            HwProjError::database_operation("test").error_type(),
            "Database Operation Error"
        );
        assert_eq!(
            HwProjError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = HwProjError::not_found("course 42");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("course 42"));
    }
}
