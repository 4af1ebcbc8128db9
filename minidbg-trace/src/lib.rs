//! minidbg 実行イベントソース
//!
//! このクレートは、デバッグ対象プログラムが発行する実行イベント（行実行・呼び出し・復帰）を
//! 表現し、テキスト形式のトレースから読み込むための機能を提供します。
//! 不正なイベントはここで弾かれ、ステップコントローラには届きません。

pub mod error;
pub mod event;
pub mod format;
pub mod recorder;
pub mod source;

pub use error::TraceError;
pub use event::{EventKind, Frame, TraceEvent};
pub use format::{parse_trace, TraceParser};
pub use recorder::Recorder;
pub use source::{EventSource, TraceReader, VecSource};

/// イベントソースの結果型
pub type Result<T> = std::result::Result<T, TraceError>;
