//! 割当対象となる固定長のメモリ領域.
use crate::partition::{PartitionRun, PartitionSize};
use crate::{ErrorKind, Result};

/// 等サイズのパーティション群に分割された、固定長のバイト領域.
///
/// 領域全体はアロケータが生存している間、アロケータによって排他的に所有される.
///
/// # 注意
///
/// これはあくまでもシミュレーション用のメモリ上の領域であり、
/// 実際のヒープ割当やページテーブルを操作するものではない.
#[derive(Debug)]
pub struct Arena {
    memory: Vec<u8>,
    partition_size: PartitionSize,
}
impl Arena {
    /// 新しい`Arena`インスタンスを生成する.
    ///
    /// 領域全体はゼロで初期化される.
    ///
    /// # Errors
    ///
    /// 以下の場合には、種類が`ErrorKind::InvalidInput`のエラーが返される:
    ///
    /// - `memory_size`が`0`
    /// - `memory_size`が`partition_size`の倍数ではない
    /// - パーティション数が32bitの範囲に収まらない
    pub fn new(memory_size: u64, partition_size: PartitionSize) -> Result<Self> {
        track_assert!(memory_size > 0, ErrorKind::InvalidInput; memory_size);
        track_assert!(
            partition_size.is_aligned(memory_size),
            ErrorKind::InvalidInput;
            memory_size,
            partition_size
        );
        let num_partitions = memory_size / u64::from(partition_size.as_u32());
        track_assert!(num_partitions <= 0xFFFF_FFFF, ErrorKind::InvalidInput; num_partitions);
        Ok(Arena {
            memory: vec![0; memory_size as usize],
            partition_size,
        })
    }

    /// 領域全体の容量（バイト単位）を返す.
    pub fn capacity(&self) -> u64 {
        self.memory.len() as u64
    }

    /// パーティションサイズを返す.
    pub fn partition_size(&self) -> PartitionSize {
        self.partition_size
    }

    /// 領域を構成するパーティションの総数を返す.
    pub fn num_partitions(&self) -> u32 {
        (self.capacity() / u64::from(self.partition_size.as_u32())) as u32
    }

    /// `run`が示す連続領域のバイト列への参照を返す.
    ///
    /// # Errors
    ///
    /// `run`の終端が領域の範囲外の場合には、
    /// 種類が`ErrorKind::InvalidInput`のエラーが返される.
    pub fn run_bytes(&self, run: PartitionRun) -> Result<&[u8]> {
        let (offset, len) = track!(self.run_range(run))?;
        Ok(&self.memory[offset..offset + len])
    }

    /// `run`が示す連続領域のバイト列への可変参照を返す.
    ///
    /// # Errors
    ///
    /// `run`の終端が領域の範囲外の場合には、
    /// 種類が`ErrorKind::InvalidInput`のエラーが返される.
    pub fn run_bytes_mut(&mut self, run: PartitionRun) -> Result<&mut [u8]> {
        let (offset, len) = track!(self.run_range(run))?;
        Ok(&mut self.memory[offset..offset + len])
    }

    fn run_range(&self, run: PartitionRun) -> Result<(usize, usize)> {
        track_assert!(run.end() <= self.num_partitions(), ErrorKind::InvalidInput; run);
        let offset = run.byte_offset(self.partition_size) as usize;
        let len = run.byte_len(self.partition_size) as usize;
        Ok((offset, len))
    }
}

#[cfg(test)]
mod tests {
    use trackable::result::TestResult;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn it_works() -> TestResult {
        let partition_size = track!(PartitionSize::new(1024))?;
        let mut arena = track!(Arena::new(16384, partition_size))?;
        assert_eq!(arena.capacity(), 16384);
        assert_eq!(arena.num_partitions(), 16);
        assert_eq!(arena.partition_size(), partition_size);

        let run = PartitionRun { start: 2, count: 3 };
        {
            let bytes = track!(arena.run_bytes_mut(run))?;
            assert_eq!(bytes.len(), 3 * 1024);
            bytes[0] = 0xAA;
        }
        assert_eq!(track!(arena.run_bytes(run))?[0], 0xAA);
        assert_eq!(arena.run_bytes(PartitionRun { start: 0, count: 1 })?[0], 0);
        Ok(())
    }

    #[test]
    fn invalid_geometry() -> TestResult {
        let partition_size = track!(PartitionSize::new(1024))?;
        assert_eq!(
            Arena::new(0, partition_size).err().map(|e| *e.kind()),
            Some(ErrorKind::InvalidInput)
        );
        assert_eq!(
            Arena::new(1025, partition_size).err().map(|e| *e.kind()),
            Some(ErrorKind::InvalidInput)
        );
        Ok(())
    }

    #[test]
    fn out_of_range_run() -> TestResult {
        let partition_size = track!(PartitionSize::new(1024))?;
        let arena = track!(Arena::new(4096, partition_size))?;
        let run = PartitionRun { start: 3, count: 2 };
        assert_eq!(
            arena.run_bytes(run).err().map(|e| *e.kind()),
            Some(ErrorKind::InvalidInput)
        );
        Ok(())
    }
}
