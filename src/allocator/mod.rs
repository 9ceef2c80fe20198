//! 固定パーティション方式のアロケータ.
//!
//! アロケータは、等サイズのパーティション群に分割された固定長のアリーナを受け取り、
//! 個々のプロセスに対して、その中から必要な数の連続したパーティション群
//! （[PartitionRun]）を割り当てる責務を負っている。
//!
//! アロケータが担当するのは、領域の計算処理のみで、実データの読み書きをこの中で行うことは無い.
//!
//! [PartitionRun]: ../partition/struct.PartitionRun.html
pub use self::bitmap::BitmapSnapshot;
pub use self::builder::AllocatorBuilder;
pub use self::partition_allocator::PartitionAllocator;

mod bitmap;
mod builder;
mod partition_allocator;
