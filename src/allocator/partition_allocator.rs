//! Partition Allocator.

use slog::Logger;
use std::collections::BTreeMap;

use super::bitmap::{BitmapSnapshot, OwnerBitmap};
use crate::arena::Arena;
use crate::metrics::AllocatorMetrics;
use crate::partition::{PartitionRun, PartitionSize};
use crate::process::{Process, ProcessId};
use crate::{ErrorKind, Result};

/// 固定パーティション方式のアロケータ.
///
/// 指定された容量を有するアリーナから、個々のプロセスに必要な連続領域の割当を担当する.
///
/// 割当の単位は"バイト"ではなく、"パーティション"となる.
/// (ただし、これを利用側のレイヤーで意識する必要はない)
///
/// この実装は、完全にメモリ上のデータ構造であり、状態は永続化されない.
/// アロケータの状態は、これを包含するプロセスの生存期間だけ有効となる.
///
/// # 割当戦略
///
/// このアロケータは"FirstFit"戦略を採用している.
///
/// 新規割当要求が発行された際には、ビットマップを先頭から一回だけ走査し、
/// 要求サイズを満たす空き連続領域のうち、開始位置が最小のものが選択される.
/// 使用中のスロットに突き当たった場合には、その直後から走査が再開されるため、
/// 走査全体の計算量はパーティション数に対して線形となる.
///
/// # 割当台帳
///
/// ビットマップに加えて、ID毎の割当済み連続領域を保持する台帳を管理している.
/// 解放時にはこの台帳から実際の割当範囲が引かれるため、
/// 利用側が割当時のサイズを再度渡す必要は無い.
///
/// # 識別子の重複について
///
/// `allocate`は、渡されたIDが既に生存中の割当に使われているかどうかを検査しない
/// （一意性の保証は利用側の契約）. 同一IDで複数回の割当が行われた場合、
/// 台帳には最後の割当のみが記録され、それ以前の割当は`deallocate`からは
/// 到達不能となる（ビットマップ上にはマークが残り続ける）.
#[derive(Debug)]
pub struct PartitionAllocator {
    arena: Arena,
    bitmap: OwnerBitmap,
    live: BTreeMap<ProcessId, PartitionRun>,
    metrics: AllocatorMetrics,
    logger: Logger,
}
impl PartitionAllocator {
    pub(crate) fn new(arena: Arena, metrics: AllocatorMetrics, logger: Logger) -> Self {
        let bitmap = OwnerBitmap::new(arena.num_partitions());
        PartitionAllocator {
            arena,
            bitmap,
            live: BTreeMap::new(),
            metrics,
            logger,
        }
    }

    /// アリーナのパーティションサイズを返す.
    pub fn partition_size(&self) -> PartitionSize {
        self.arena.partition_size()
    }

    /// アリーナを構成するパーティションの総数を返す.
    pub fn num_partitions(&self) -> u32 {
        self.arena.num_partitions()
    }

    /// アリーナ全体の容量（バイト単位）を返す.
    pub fn capacity(&self) -> u64 {
        self.arena.capacity()
    }

    /// `size`バイトの要求に必要なパーティション数を返す.
    ///
    /// 端数は切り上げられる. `size`が`0`の場合には`0`が返される
    /// (ただし`allocate`はゼロサイズの要求を受け付けない).
    pub fn partitions_needed(&self, size: u64) -> u64 {
        self.partition_size().ceil_partitions(size)
    }

    /// `process`の要求サイズ分の連続領域の割当を行う.
    ///
    /// 成功した場合には、割り当てられた連続領域が返される.
    /// 割当によって変化するのはビットマップと台帳のみで、アリーナの実データには触れない.
    ///
    /// # Errors
    ///
    /// - `ErrorKind::InvalidInput`:
    ///   - 要求サイズが`0`、もしくは必要パーティション数がアリーナの総数を超えている
    ///   - いずれの場合もビットマップの走査自体が行われない
    /// - `ErrorKind::OutOfMemory`:
    ///   - 要求サイズを満たす空き連続領域が存在しない
    ///
    /// いずれのエラーの場合にも、アロケータの状態は一切変化しない.
    pub fn allocate(&mut self, process: &Process) -> Result<PartitionRun> {
        let needed = self.partitions_needed(process.size);
        track_assert!(needed > 0, ErrorKind::InvalidInput; process.id, process.size);
        track_assert!(
            needed <= u64::from(self.num_partitions()),
            ErrorKind::InvalidInput;
            process.id,
            process.size
        );

        let count = needed as u32;
        match self.bitmap.first_fit(count) {
            Some(start) => {
                let run = PartitionRun { start, count };
                self.bitmap.fill(run, process.id);
                self.live.insert(process.id, run);
                self.metrics.count_allocation(count);
                debug!(self.logger, "Allocated {} partition(s) at index {}", count, start;
                       "process" => %process.id, "name" => %process.name);
                Ok(run)
            }
            None => {
                self.metrics.nospace_failures.increment();
                warn!(self.logger, "No contiguous run of {} free partition(s)", count;
                      "process" => %process.id, "name" => %process.name);
                track_panic!(ErrorKind::OutOfMemory; process.id, process.size)
            }
        }
    }

    /// `id`のプロセスに割り当てられている連続領域の解放を行う.
    ///
    /// 解放される範囲は台帳に記録されている割当時の範囲と正確に一致する.
    ///
    /// # Errors
    ///
    /// - `ErrorKind::NotFound`:
    ///   - `id`に対応する生存中の割当が存在しない（ビットマップは変化しない）
    /// - `ErrorKind::InconsistentState`:
    ///   - 台帳とビットマップの内容が食い違っている（プログラムのバグを示す）
    ///
    /// いずれのエラーの場合にも、アロケータの状態は一切変化しない.
    pub fn deallocate(&mut self, id: ProcessId) -> Result<()> {
        let run = match self.live.get(&id) {
            Some(&run) => run,
            None => {
                self.metrics.notfound_failures.increment();
                warn!(self.logger, "No live allocation to release"; "process" => %id);
                track_panic!(ErrorKind::NotFound, "process={}", id);
            }
        };
        track_assert!(
            self.bitmap.is_run_owned_by(run, id),
            ErrorKind::InconsistentState;
            id,
            run
        );

        self.live.remove(&id);
        self.bitmap.clear(run);
        self.metrics.count_release(run.count);
        debug!(self.logger, "Released {} partition(s) at index {}", run.count, run.start;
               "process" => %id);
        Ok(())
    }

    /// `id`のプロセスに現在割り当てられている連続領域を返す.
    ///
    /// 割当が存在しない場合には`None`が返される.
    /// 同一IDで複数回の割当が行われていた場合には、最後の割当のみが返される.
    pub fn allocation(&self, id: ProcessId) -> Option<PartitionRun> {
        self.live.get(&id).cloned()
    }

    /// 現在のビットマップのスナップショットを返す.
    ///
    /// 診断用の読み取り専用ビューであり、アロケータの状態は変化しない.
    pub fn snapshot(&self) -> BitmapSnapshot {
        self.bitmap.snapshot()
    }

    /// アロケータ用のメトリクスを返す.
    pub fn metrics(&self) -> &AllocatorMetrics {
        &self.metrics
    }

    /// アリーナへの参照を返す.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// アリーナへの可変参照を返す.
    ///
    /// 割当済み領域の実データの読み書きは利用側の責務であり、
    /// アロケータ自身が実データに触れることはない.
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }
}
