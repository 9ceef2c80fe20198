//! Partition First-Fit.
//!
//! `parfit`は、固定パーティション方式のメモリ割当をシミュレートするためのライブラリ.
//!
//! # 特徴
//!
//! - 固定長のバイト列([アリーナ][arena])を、等サイズのパーティション群に分割して管理する
//! - 割当状況は、パーティションと添字が揃った所有者タグの列(ビットマップ)として保持される
//! - 割当戦略は"FirstFit": 要求サイズを満たす空き連続領域のうち、開始位置が最小のものが選択される
//! - 割当の単位は"バイト"ではなく"パーティション"であり、要求サイズの端数は切り上げられる
//! - 全ての操作は同期的かつ`O(パーティション数)`以下で完了し、失敗してもアロケータの状態は有効なまま保たれる
//!
//! # モジュールの依存関係
//!
//! ```text
//! allocator => arena => partition
//! ```
//!
//! - [allocator]モジュール:
//!   - 主に[PartitionAllocator]構造体を提供
//!   - `parfit`の利用者が直接触るのはこの構造体
//!   - ビットマップの走査・割当台帳の管理・メトリクスの記録を担当する
//! - [arena]モジュール:
//!   - 割当対象となる固定長のバイト領域([Arena])を提供
//!   - 領域の構成(容量・パーティションサイズ)の検証もここで行われる
//! - [partition]モジュール:
//!   - パーティションサイズや連続領域([PartitionRun])等の基本型を提供
//!
//! # 並行性について
//!
//! アロケータは単一スレッドでの利用を前提としており、排他制御は内蔵していない.
//! 複数スレッドから利用する場合には、利用側で`allocate`/`deallocate`の呼び出し毎に
//! 排他ロックを確保する必要がある.
//!
//! [arena]: ./arena/index.html
//! [Arena]: ./arena/struct.Arena.html
//! [allocator]: ./allocator/index.html
//! [PartitionAllocator]: ./allocator/struct.PartitionAllocator.html
//! [partition]: ./partition/index.html
//! [PartitionRun]: ./partition/struct.PartitionRun.html
#![warn(missing_docs)]
extern crate prometrics;
#[macro_use]
extern crate slog;
#[macro_use]
extern crate trackable;
extern crate uuid;

pub use crate::error::{Error, ErrorKind};

pub mod allocator;
pub mod arena;
pub mod metrics;
pub mod partition;
pub mod process;

mod error;

/// crate固有の`Result`型.
pub type Result<T> = std::result::Result<T, Error>;
