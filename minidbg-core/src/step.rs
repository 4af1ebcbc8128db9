//! ステップ実行の状態とコマンド

use std::fmt;

/// ステップ状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StepState {
    /// ブレークポイント以外では停止しない
    #[default]
    Running,
    /// 深さが `target_depth` 以下になった次の行で停止する
    Stepping { target_depth: i64 },
}

impl StepState {
    /// ステップ実行が有効か
    pub fn is_stepping(&self) -> bool {
        matches!(self, StepState::Stepping { .. })
    }

    /// 指定の深さで停止すべきか
    pub fn should_pause(&self, depth: i64) -> bool {
        match *self {
            StepState::Running => false,
            StepState::Stepping { target_depth } => depth <= target_depth,
        }
    }
}

impl fmt::Display for StepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepState::Running => f.write_str("running"),
            StepState::Stepping { target_depth } => {
                write!(f, "stepping (target depth {})", target_depth)
            }
        }
    }
}

/// 停止中に発行できるステップコマンド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCommand {
    /// 実行継続（ステップ解除）
    Continue,
    /// 同じフレームかそれより浅い位置の次の行で停止
    StepOver,
    /// 1段深い呼び出しの中でも次の行で停止
    StepIn,
    /// 呼び出し元に戻ってから停止
    StepOut,
}

impl StepCommand {
    /// 現在の深さから次の停止方針を決める
    pub fn next_state(self, depth: i64) -> StepState {
        match self {
            StepCommand::Continue => StepState::Running,
            StepCommand::StepOver => StepState::Stepping { target_depth: depth },
            StepCommand::StepIn => StepState::Stepping {
                target_depth: depth + 1,
            },
            StepCommand::StepOut => StepState::Stepping {
                target_depth: depth - 1,
            },
        }
    }
}

impl fmt::Display for StepCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepCommand::Continue => "cont",
            StepCommand::StepOver => "step_over",
            StepCommand::StepIn => "step_in",
            StepCommand::StepOut => "step_out",
        };
        f.write_str(name)
    }
}
