use prometrics::metrics::MetricBuilder;
use slog::{Discard, Logger};
use uuid::Uuid;

use super::PartitionAllocator;
use crate::arena::Arena;
use crate::metrics::AllocatorMetrics;
use crate::partition::PartitionSize;
use crate::Result;

/// `PartitionAllocator`のビルダ.
#[derive(Debug, Clone)]
pub struct AllocatorBuilder {
    partition_size: PartitionSize,
    instance_uuid: Option<Uuid>,
    metrics: MetricBuilder,
    logger: Logger,
}
impl AllocatorBuilder {
    /// デフォルト設定で`AllocatorBuilder`インスタンスを生成する.
    pub fn new() -> Self {
        AllocatorBuilder {
            partition_size: PartitionSize::default(),
            instance_uuid: None,
            metrics: MetricBuilder::new(),
            logger: Logger::root(Discard, o!()),
        }
    }

    /// アリーナのパーティションサイズを設定する.
    ///
    /// デフォルト値は`PartitionSize::default()`.
    pub fn partition_size(&mut self, partition_size: PartitionSize) -> &mut Self {
        self.partition_size = partition_size;
        self
    }

    /// アロケータインスタンスを識別するためのUUIDを設定する.
    ///
    /// この値はメトリクスのラベルとして使用される.
    /// 本メソッドが呼ばれていない場合は、ランダムなUUIDが割り当てられる.
    pub fn instance_uuid(&mut self, uuid: Uuid) -> &mut Self {
        self.instance_uuid = Some(uuid);
        self
    }

    /// メトリクス用の共通設定を登録する.
    ///
    /// デフォルト値は`MetricBuilder::new()`.
    pub fn metrics(&mut self, metrics: MetricBuilder) -> &mut Self {
        self.metrics = metrics;
        self
    }

    /// アロケータ用のloggerを登録する.
    ///
    /// デフォルトでは何も出力されない.
    pub fn logger(&mut self, logger: Logger) -> &mut Self {
        self.logger = logger;
        self
    }

    /// 指定された容量のアリーナを持つ`PartitionAllocator`を生成する.
    ///
    /// アリーナの全パーティションは空きの状態で初期化される.
    ///
    /// # Errors
    ///
    /// `memory_size`が`0`、もしくはパーティションサイズの倍数でない場合には、
    /// 種類が`ErrorKind::InvalidInput`のエラーが返される.
    pub fn build(&self, memory_size: u64) -> Result<PartitionAllocator> {
        let arena = track!(Arena::new(memory_size, self.partition_size))?;
        let instance_uuid = self.instance_uuid.unwrap_or_else(Uuid::new_v4);
        let metrics = AllocatorMetrics::new(
            &self.metrics,
            instance_uuid,
            arena.partition_size(),
            arena.num_partitions(),
        );
        Ok(PartitionAllocator::new(arena, metrics, self.logger.clone()))
    }
}
impl Default for AllocatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
