//! 呼び出し深さの追跡

/// 呼び出し深さカウンタ
///
/// 呼び出しで1増え、復帰で1減るだけの純粋なカウンタです。
/// トレースが呼び出しスタックの途中から始まった場合は負になり得ますが、補正はしません。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepthTracker {
    depth: i64,
}

impl DepthTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_call(&mut self) {
        self.depth += 1;
    }

    pub fn on_return(&mut self) {
        self.depth -= 1;
    }

    /// 現在の深さ
    pub fn current(&self) -> i64 {
        self.depth
    }
}
