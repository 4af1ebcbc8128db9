//! デバッガのエラー

use crate::StepCommand;
use minidbg_trace::TraceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DebugError {
    /// 停止中でないときにステップコマンドが呼ばれた
    #[error("'{0}' is only available while the program is paused")]
    NotPaused(StepCommand),

    #[error("invalid location '{0}', expected FILE:LINE")]
    InvalidLocation(String),

    #[error("{0}")]
    InvalidCommand(String),

    /// 停止中のセッションからデバッグ対象の実行が中断された
    #[error("execution aborted")]
    Aborted,

    #[error(transparent)]
    Trace(#[from] TraceError),
}
