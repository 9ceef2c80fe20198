//! パーティション関連の基本型.
use crate::{ErrorKind, Result};

/// アリーナの分割単位となるパーティションのサイズを表現するための構造体.
///
/// "パーティション"は割当の最小単位であり、割当要求のサイズは
/// 常にパーティションサイズの倍数に切り上げられる.
///
/// 切り上げ計算等の補助メソッド群も提供している.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartitionSize(u32);
impl PartitionSize {
    /// 既定のパーティションサイズ（バイト単位）.
    ///
    /// `PartitionSize::default()`で使われる値でもある.
    pub const DEFAULT: u32 = 1024;

    /// 指定された値のパーティションサイズを表現する`PartitionSize`インスタンスを生成する.
    ///
    /// # Errors
    ///
    /// `partition_size`が`0`の場合には、種類が`ErrorKind::InvalidInput`のエラーが返される.
    ///
    /// # Examples
    ///
    /// ```
    /// use parfit::ErrorKind;
    /// use parfit::partition::PartitionSize;
    ///
    /// assert_eq!(PartitionSize::new(1024).ok().map(|p| p.as_u32()), Some(1024));
    /// assert_eq!(PartitionSize::new(0).err().map(|e| *e.kind()), Some(ErrorKind::InvalidInput));
    /// ```
    #[allow(clippy::new_ret_no_self)]
    pub fn new(partition_size: u32) -> Result<Self> {
        track_assert!(partition_size > 0, ErrorKind::InvalidInput);
        Ok(PartitionSize(partition_size))
    }

    /// パーティションサイズ値を`u32`に変換して返す.
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// `size`バイトを格納するのに必要なパーティション数を返す.
    ///
    /// 端数は切り上げられる.
    ///
    /// # Examples
    ///
    /// ```
    /// use parfit::partition::PartitionSize;
    ///
    /// let partition_size = PartitionSize::new(1024).unwrap();
    /// assert_eq!(partition_size.ceil_partitions(0), 0);
    /// assert_eq!(partition_size.ceil_partitions(1), 1);
    /// assert_eq!(partition_size.ceil_partitions(1024), 1);
    /// assert_eq!(partition_size.ceil_partitions(1025), 2);
    /// ```
    pub fn ceil_partitions(self, size: u64) -> u64 {
        let partition_size = u64::from(self.0);
        (size + partition_size - 1) / partition_size
    }

    /// 指定位置がパーティション境界に沿っているかどうかを判定する.
    ///
    /// # Examples
    ///
    /// ```
    /// use parfit::partition::PartitionSize;
    ///
    /// let partition_size = PartitionSize::new(1024).unwrap();
    /// assert!(partition_size.is_aligned(0));
    /// assert!(partition_size.is_aligned(2048));
    ///
    /// assert!(!partition_size.is_aligned(1023));
    /// ```
    pub fn is_aligned(self, position: u64) -> bool {
        (position % u64::from(self.0)) == 0
    }
}
impl Default for PartitionSize {
    fn default() -> Self {
        PartitionSize(Self::DEFAULT)
    }
}

/// アリーナ内の連続したパーティション群を示すための構造体.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartitionRun {
    /// 連続領域の開始位置（パーティション単位）
    pub start: u32,

    /// 連続領域の長さ（パーティション単位）
    pub count: u32,
}
impl PartitionRun {
    /// 連続領域の終端位置を返す.
    ///
    /// **注意**: `PartitionRun`は`[start, end)`の領域を表すため、
    /// `end`位置のパーティションはこの領域には含まれない.
    pub fn end(&self) -> u32 {
        self.start + self.count
    }

    /// 連続領域の開始位置をアリーナ先頭からのバイトオフセットで返す.
    pub fn byte_offset(&self, partition_size: PartitionSize) -> u64 {
        u64::from(self.start) * u64::from(partition_size.as_u32())
    }

    /// 連続領域の長さをバイト単位で返す.
    pub fn byte_len(&self, partition_size: PartitionSize) -> u64 {
        u64::from(self.count) * u64::from(partition_size.as_u32())
    }
}
