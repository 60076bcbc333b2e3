//! Error Kind - Classification of guard failures
//!
//! Defines the [`ErrorKind`] enum.

use serde::Serialize;

/// 失敗種別の列挙体
///
/// コンタクトフォームの送信が中断される理由を分類します。
/// 時間を置けば解消するもの（再試行可能）と、そうでないものを区別します。
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::TooManyRequests;
/// assert_eq!(kind.as_str(), "Too Many Requests");
/// assert!(kind.is_retryable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 不審な入力（SQL パターン等）
    SuspiciousInput,
    /// フィールド単位の入力エラー
    InvalidInput,
    /// レート制限・クールダウン・連打防止
    TooManyRequests,
    /// メール送信サービスの失敗
    Transport,
    /// 送信サービスの資格情報が未設定
    Configuration,
}

impl ErrorKind {
    /// ログやトースト表示用の名前
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::SuspiciousInput => "Suspicious Input",
            ErrorKind::InvalidInput => "Invalid Input",
            ErrorKind::TooManyRequests => "Too Many Requests",
            ErrorKind::Transport => "Transport Error",
            ErrorKind::Configuration => "Configuration Error",
        }
    }

    /// 同じ内容のまま再試行して成功し得るか
    ///
    /// 送信失敗と時間制限は再試行可能。入力エラーや設定不備は不可。
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Transport | ErrorKind::TooManyRequests)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
