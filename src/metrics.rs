//! [Prometheus][prometheus]用のメトリクス.
//!
//! [prometheus]: https://prometheus.io/
use prometrics::metrics::{Counter, Gauge, MetricBuilder};
use uuid::Uuid;

use crate::partition::PartitionSize;

/// [`PartitionAllocator`]のメトリクス.
///
/// [`PartitionAllocator`]: ../allocator/struct.PartitionAllocator.html
///
/// # Prometheus
///
/// `Methods`節に記載の無いメトリクスのみを掲載:
///
/// ```prometheus
/// parfit_allocator_arena_info { uuid="<UUID>", partition_size="<BYTES>", num_partitions="<COUNT>" } 1
/// ```
#[derive(Debug, Clone)]
pub struct AllocatorMetrics {
    pub(crate) arena_info: Gauge,
    pub(crate) allocated_processes: Counter,
    pub(crate) allocated_partitions: Counter,
    pub(crate) released_processes: Counter,
    pub(crate) released_partitions: Counter,
    pub(crate) nospace_failures: Counter,
    pub(crate) notfound_failures: Counter,
    pub(crate) partition_size: PartitionSize,
    pub(crate) num_partitions: u32,
}
impl AllocatorMetrics {
    /// 割当の成功回数.
    ///
    /// # Prometheus
    ///
    /// ```prometheus
    /// parfit_allocator_allocated_processes_total <COUNTER>
    /// ```
    pub fn allocated_processes(&self) -> u64 {
        self.allocated_processes.value() as u64
    }

    /// これまでに割り当てたパーティション数の合計.
    ///
    /// # Prometheus
    ///
    /// ```prometheus
    /// parfit_allocator_allocated_partitions_total <COUNTER>
    /// ```
    pub fn allocated_partitions(&self) -> u64 {
        self.allocated_partitions.value() as u64
    }

    /// 解放の成功回数.
    ///
    /// # Prometheus
    ///
    /// ```prometheus
    /// parfit_allocator_released_processes_total <COUNTER>
    /// ```
    pub fn released_processes(&self) -> u64 {
        self.released_processes.value() as u64
    }

    /// これまでに解放されたパーティション数の合計.
    ///
    /// # Prometheus
    ///
    /// ```prometheus
    /// parfit_allocator_released_partitions_total <COUNTER>
    /// ```
    pub fn released_partitions(&self) -> u64 {
        self.released_partitions.value() as u64
    }

    /// 空き連続領域不足による割当失敗回数.
    ///
    /// # Prometheus
    ///
    /// ```prometheus
    /// parfit_allocator_nospace_failures_total <COUNTER>
    /// ```
    pub fn nospace_failures(&self) -> u64 {
        self.nospace_failures.value() as u64
    }

    /// 未知のIDの指定による解放失敗回数.
    ///
    /// # Prometheus
    ///
    /// ```prometheus
    /// parfit_allocator_notfound_failures_total <COUNTER>
    /// ```
    pub fn notfound_failures(&self) -> u64 {
        self.notfound_failures.value() as u64
    }

    /// 現在生存している割当の数.
    ///
    /// # Prometheus
    ///
    /// ```prometheus
    /// parfit_allocator_allocated_processes_total - parfit_allocator_released_processes_total
    /// ```
    pub fn live_processes(&self) -> u64 {
        // NOTE: 以下の順番で値を取得しないとアンダーフローする可能性がある
        let dec = self.released_processes();
        let inc = self.allocated_processes();
        inc - dec
    }

    /// 現在割当済みのパーティション数.
    ///
    /// # Prometheus
    ///
    /// ```prometheus
    /// parfit_allocator_allocated_partitions_total - parfit_allocator_released_partitions_total
    /// ```
    pub fn usage_partitions(&self) -> u64 {
        // NOTE: 以下の順番で値を取得しないとアンダーフローする可能性がある
        let dec = self.released_partitions();
        let inc = self.allocated_partitions();
        inc - dec
    }

    /// 現在の空きパーティション数.
    pub fn free_partitions(&self) -> u64 {
        u64::from(self.num_partitions) - self.usage_partitions()
    }

    /// アリーナを構成するパーティションの総数.
    pub fn num_partitions(&self) -> u32 {
        self.num_partitions
    }

    /// アリーナのパーティションサイズ.
    pub fn partition_size(&self) -> PartitionSize {
        self.partition_size
    }

    /// アリーナ全体の容量（バイト単位）.
    pub fn capacity_bytes(&self) -> u64 {
        u64::from(self.num_partitions) * u64::from(self.partition_size.as_u32())
    }

    pub(crate) fn new(
        builder: &MetricBuilder,
        instance_uuid: Uuid,
        partition_size: PartitionSize,
        num_partitions: u32,
    ) -> Self {
        let mut builder = builder.clone();
        builder.namespace("parfit").subsystem("allocator");
        AllocatorMetrics {
            arena_info: builder
                .gauge("arena_info")
                .help("Static information of the arena")
                .label("uuid", &instance_uuid.to_string())
                .label("partition_size", &partition_size.as_u32().to_string())
                .label("num_partitions", &num_partitions.to_string())
                .initial_value(1.0)
                .finish()
                .expect("Never fails"),
            allocated_processes: builder
                .counter("allocated_processes_total")
                .help("Number of successful allocations")
                .finish()
                .expect("Never fails"),
            allocated_partitions: builder
                .counter("allocated_partitions_total")
                .help("Number of allocated partitions")
                .finish()
                .expect("Never fails"),
            released_processes: builder
                .counter("released_processes_total")
                .help("Number of successful deallocations")
                .finish()
                .expect("Never fails"),
            released_partitions: builder
                .counter("released_partitions_total")
                .help("Number of released partitions")
                .finish()
                .expect("Never fails"),
            nospace_failures: builder
                .counter("nospace_failures_total")
                .help("Number of allocation failures caused by no available contiguous space")
                .finish()
                .expect("Never fails"),
            notfound_failures: builder
                .counter("notfound_failures_total")
                .help("Number of deallocation failures caused by an unknown process id")
                .finish()
                .expect("Never fails"),
            partition_size,
            num_partitions,
        }
    }

    pub(crate) fn count_allocation(&self, partitions: u32) {
        self.allocated_processes.increment();
        self.allocated_partitions.add_u64(u64::from(partitions));
    }

    pub(crate) fn count_release(&self, partitions: u32) {
        self.released_processes.increment();
        self.released_partitions.add_u64(u64::from(partitions));
    }
}
