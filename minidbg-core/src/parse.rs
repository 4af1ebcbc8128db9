//! パース関連のユーティリティ関数

use crate::{DebugError, Result};
use std::path::PathBuf;
use std::str::FromStr;

/// `FILE:LINE` 形式の位置をパース
///
/// パスは最後のコロンまでを取り、行番号は1以上でなければなりません。
///
/// # Examples
/// ```
/// use minidbg_core::parse::parse_location;
///
/// let (file, line) = parse_location("lib/a.rb:10").unwrap();
/// assert_eq!(file.to_str(), Some("lib/a.rb"));
/// assert_eq!(line, 10);
/// ```
pub fn parse_location(s: &str) -> Result<(PathBuf, u32)> {
    let s = s.trim();
    let invalid = || DebugError::InvalidLocation(s.to_string());

    let (file, line) = s.rsplit_once(':').ok_or_else(invalid)?;
    if file.is_empty() {
        return Err(invalid());
    }

    let line = line
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(invalid)?;

    Ok((PathBuf::from(file), line))
}

/// コマンドラインで指定するブレークポイント（`NAME=FILE:LINE`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakpointSpec {
    pub name: String,
    pub file: PathBuf,
    pub line: u32,
}

impl FromStr for BreakpointSpec {
    type Err = DebugError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, location) = s.split_once('=').ok_or_else(|| {
            DebugError::InvalidCommand(format!("expected NAME=FILE:LINE, got '{}'", s))
        })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(DebugError::InvalidCommand(format!(
                "breakpoint name is empty in '{}'",
                s
            )));
        }

        let (file, line) = parse_location(location)?;
        Ok(Self {
            name: name.to_string(),
            file,
            line,
        })
    }
}
