//! ブレークポイント管理

use std::fmt;
use std::path::{Path, PathBuf};

/// ブレークポイント
///
/// 作成後は変更されません。名前は検索・削除のキーですが一意である必要はありません。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoint {
    name: String,
    file: PathBuf,
    line: u32,
}

impl Breakpoint {
    pub fn new(name: impl Into<String>, file: impl Into<PathBuf>, line: u32) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            line,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// 指定位置に一致するか
    pub fn matches(&self, file: &Path, line: u32) -> bool {
        self.line == line && self.file == file
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}:{}", self.name, self.file.display(), self.line)
    }
}

/// ブレークポイントレジストリ
///
/// 挿入順を保持します。名前や位置の重複は許され、同じ位置に複数登録された場合は
/// すべてがヒットとして報告されます。
/// ブレークポイント数はデバッグ時の規模なので、位置検索は線形走査で十分です。
#[derive(Debug, Clone, Default)]
pub struct BreakpointRegistry {
    breakpoints: Vec<Breakpoint>,
}

impl BreakpointRegistry {
    /// 空のレジストリを作成する
    pub fn new() -> Self {
        Self::default()
    }

    /// ブレークポイントを追加する
    pub fn add(&mut self, breakpoint: Breakpoint) {
        self.breakpoints.push(breakpoint);
    }

    /// 名前が一致するブレークポイントをすべて削除する
    ///
    /// 削除した数を返します。一致しなければ何もしません。
    pub fn delete(&mut self, name: &str) -> usize {
        let before = self.breakpoints.len();
        self.breakpoints.retain(|bp| bp.name != name);
        before - self.breakpoints.len()
    }

    /// 指定位置に一致するブレークポイントを登録順に返す
    pub fn find_matching<'a>(
        &'a self,
        file: &'a Path,
        line: u32,
    ) -> impl Iterator<Item = &'a Breakpoint> + 'a {
        self.breakpoints.iter().filter(move |bp| bp.matches(file, line))
    }

    /// 全てのブレークポイントを取得する
    pub fn iter(&self) -> impl Iterator<Item = &Breakpoint> {
        self.breakpoints.iter()
    }

    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    pub fn clear(&mut self) {
        self.breakpoints.clear();
    }
}
