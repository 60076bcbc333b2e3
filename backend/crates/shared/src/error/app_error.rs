//! Application Error - Unified error type for the contact guard
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// 統一エラー型
///
/// ガードが中断した理由を、そのままトースト通知に渡せる形で保持します。
/// ビルダーパターンで構築します。
///
/// ## Fields
/// * `kind` - 失敗の分類
/// * `message` - ユーザー向けの主メッセージ
/// * `description` - 補足（代替連絡先など、オプション）
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::transport("Failed to send message. Please try again later.")
///     .with_description("Or contact me directly at owner@example.com");
/// assert_eq!(err.kind(), ErrorKind::Transport);
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    description: Option<Cow<'static, str>>,
}

/// `Result<T, AppError>` の省略形
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// 新しいエラーを作成
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            description: None,
        }
    }

    /// 入力エラー
    #[inline]
    pub fn invalid_input(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    /// 不審な入力
    #[inline]
    pub fn suspicious_input(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::SuspiciousInput, message)
    }

    /// レート制限
    #[inline]
    pub fn too_many_requests(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::TooManyRequests, message)
    }

    /// 送信失敗
    #[inline]
    pub fn transport(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// 設定不備
    #[inline]
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// 補足説明を設定
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::app_error::AppError;
    /// let err = AppError::configuration("Email configuration is missing.")
    ///     .with_description("owner@example.com");
    /// assert_eq!(err.description(), Some("owner@example.com"));
    /// ```
    #[inline]
    pub fn with_description(mut self, description: impl Into<Cow<'static, str>>) -> Self {
        self.description = Some(description.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[inline]
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if let Some(description) = &self.description {
            builder.field("description", description);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(description) = &self.description {
            write!(f, " ({})", description)?;
        }
        Ok(())
    }
}

impl Error for AppError {}
