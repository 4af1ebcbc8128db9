//! トレース読み込みのエラー

use thiserror::Error;

/// トレースの読み込み・解析エラー
///
/// `line` はトレース中の1始まりの行番号です。
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("line {line}: unknown event kind '{kind}'")]
    UnknownKind { line: usize, kind: String },

    #[error("line {line}: 'line' event requires a FILE:LINE location")]
    MissingLocation { line: usize },

    #[error("line {line}: invalid line number '{value}'")]
    InvalidLineNumber { line: usize, value: String },

    #[error("line {line}: unexpected payload after '{kind}' event")]
    UnexpectedPayload { line: usize, kind: String },

    #[error("invalid trace pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),
}
