//! minidbg デバッガのコア機能
//!
//! このクレートは、行単位のブレークポイントとステップ実行を行うデバッガの中核を提供します。
//! ブレークポイントの管理、呼び出し深さの追跡、停止判定を行うステップコントローラ、
//! そして停止中の対話セッションとの橋渡しを統合します。

pub mod breakpoint;
pub mod command;
pub mod config;
pub mod debugger;
pub mod depth;
pub mod errors;
pub mod parse;
pub mod pause;
pub mod session;
pub mod step;

pub use breakpoint::{Breakpoint, BreakpointRegistry};
pub use command::Command;
pub use config::DebuggerConfig;
pub use debugger::{Debugger, Stop};
pub use depth::DepthTracker;
pub use errors::DebugError;
pub use pause::{from_fn, FnHandler, PauseContext, PauseHandler};
pub use session::{Session, SessionStats};
pub use step::{StepCommand, StepState};

// 他のクレートから使用するために再エクスポート
pub use minidbg_trace::{EventKind, EventSource, Frame, TraceEvent};

/// デバッガの結果型
pub type Result<T> = std::result::Result<T, DebugError>;
