//! デバッガの設定

/// デバッガの設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebuggerConfig {
    /// セッション中、常に全イベントを購読するか
    ///
    /// `false` の場合は必要なときだけ購読します。行イベントはブレークポイントが
    /// 登録されているかステップ実行中のときだけ、呼び出し・復帰イベントは
    /// ステップ実行中のときだけ処理されます。このとき深さはステップ開始時点からの
    /// 相対値になりますが、停止判定の結果は変わりません。
    pub always_trace_calls: bool,
}

impl DebuggerConfig {
    /// 必要なときだけイベントを購読する設定
    pub fn lazy() -> Self {
        Self {
            always_trace_calls: false,
        }
    }
}

impl Default for DebuggerConfig {
    fn default() -> Self {
        Self {
            always_trace_calls: true,
        }
    }
}
