//! プロセス関連のデータ構造群.
//!
//! "プロセス"とは、`parfit`における割当要求の発行主体.
//! 各プロセスは「識別子」と「表示名」と「要求サイズ(バイト単位)」から構成される.
//!
//! `parfit`のレイヤでは、識別子の一意性の保証は行わないため、
//! 同時に生存する割当の間で識別子が重複しないようにするのは利用側の責務となる.
use std::fmt;
use std::str::FromStr;
use trackable::error::ErrorKindExt;

use crate::{Error, ErrorKind, Result};

/// プロセスの識別子(32bit幅).
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct ProcessId(u32);
impl ProcessId {
    /// 新しい`ProcessId`インスタンスを生成する.
    ///
    /// # Examples
    ///
    /// ```
    /// use parfit::process::ProcessId;
    ///
    /// assert_eq!(ProcessId::new(0xab12).to_string(), "ab12");
    ///
    /// // 16進数文字列からも生成可能
    /// assert_eq!("ab12".parse::<ProcessId>().unwrap(), ProcessId::new(0xab12));
    /// ```
    pub fn new(id: u32) -> Self {
        ProcessId(id)
    }

    /// 識別子の値(32bit整数)を返す.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}
impl FromStr for ProcessId {
    type Err = Error;

    /// 16進数表記の数値から`ProcessId`を生成する.
    ///
    /// 文字列は"32bit整数"として扱われ、先頭のゼロは省略可能（`"ab"`と`"00ab"`は等価）.
    ///
    /// # Errors
    ///
    /// 以下のいずれかの場合には、種類が`ErrorKind::InvalidInput`のエラーが返される:
    ///
    /// - 文字列が16進数表記の整数値を表していない
    /// - 数値が32bitの範囲に収まらない
    ///
    /// # Examples
    ///
    /// ```
    /// use std::str::FromStr;
    /// use parfit::ErrorKind;
    /// use parfit::process::ProcessId;
    ///
    /// assert_eq!(ProcessId::from_str("00ab").ok(), Some(ProcessId::new(0xab)));
    ///
    /// assert_eq!(ProcessId::from_str("foo_bar").err().map(|e| *e.kind()),
    ///            Some(ErrorKind::InvalidInput));
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let id = track!(u32::from_str_radix(s, 16).map_err(|e| ErrorKind::InvalidInput.cause(e)))?;
        Ok(ProcessId::new(id))
    }
}
impl fmt::Debug for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, r#"ProcessId("{}")"#, self)
    }
}
impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

/// 割当要求を発行するプロセスの記述子.
#[derive(Debug, Clone)]
pub struct Process {
    /// プロセスの識別子.
    ///
    /// 同時に生存する割当の間で一意である必要がある（利用側の責務）.
    pub id: ProcessId,

    /// プロセスの表示名（診断用）.
    pub name: String,

    /// 要求サイズ（バイト単位）.
    pub size: u64,
}
impl Process {
    /// 新しい`Process`インスタンスを生成する.
    pub fn new<T>(id: ProcessId, name: T, size: u64) -> Self
    where
        T: Into<String>,
    {
        Process {
            id,
            name: name.into(),
            size,
        }
    }
}
