//! Owner Bitmap.

use std::fmt;

use crate::partition::PartitionRun;
use crate::process::ProcessId;

/// 空きスロットの表示用タグ.
const FREE_TAG: &str = "_";

/// パーティション毎の所有者を保持するビットマップ.
///
/// スロット`i`はアリーナ内の`i`番目のパーティションに対応しており、
/// `None`は空き、`Some(id)`は`id`のプロセスへの割当済みを意味する.
///
/// 空きの表現に`Option`を用いているため、所有者ID空間から番兵値を
/// 予約する必要は無く、全てのIDが利用側から使用可能となっている.
#[derive(Debug)]
pub struct OwnerBitmap {
    slots: Vec<Option<ProcessId>>,
}
impl OwnerBitmap {
    /// 全スロットが空きの状態のビットマップを生成する.
    pub fn new(num_partitions: u32) -> Self {
        OwnerBitmap {
            slots: vec![None; num_partitions as usize],
        }
    }

    /// スロットの総数を返す.
    pub fn len(&self) -> u32 {
        self.slots.len() as u32
    }

    /// `count`個の連続した空きスロットを先頭から探し、最初に見つかった開始位置を返す.
    ///
    /// 該当する空き連続領域が存在しない場合には`None`が返される.
    ///
    /// これは"FirstFit"であり"BestFit"ではない:
    /// 十分な長さを持つ空き連続領域のうち、最も小さいものではなく、
    /// 最も手前にあるものが選択される.
    pub fn first_fit(&self, count: u32) -> Option<u32> {
        debug_assert!(count > 0);
        let count = count as usize;
        let mut run_start = 0;
        for (i, slot) in self.slots.iter().enumerate() {
            if slot.is_some() {
                // 使用中スロットを跨ぐ連続領域は存在しないので、その直後から走査を再開する
                run_start = i + 1;
            } else if i + 1 - run_start == count {
                return Some(run_start as u32);
            }
        }
        None
    }

    /// `run`が示すスロット群を`id`の所有としてマークする.
    ///
    /// # 事前条件
    ///
    /// - `run`の範囲は全て空きスロットである
    pub fn fill(&mut self, run: PartitionRun, id: ProcessId) {
        for slot in &mut self.slots[run.start as usize..run.end() as usize] {
            debug_assert!(slot.is_none());
            *slot = Some(id);
        }
    }

    /// `run`が示すスロット群を空きに戻す.
    pub fn clear(&mut self, run: PartitionRun) {
        for slot in &mut self.slots[run.start as usize..run.end() as usize] {
            debug_assert!(slot.is_some());
            *slot = None;
        }
    }

    /// `run`が示すスロット群が全て`id`の所有であるかどうかを判定する.
    pub fn is_run_owned_by(&self, run: PartitionRun, id: ProcessId) -> bool {
        run.end() <= self.len()
            && self.slots[run.start as usize..run.end() as usize]
                .iter()
                .all(|slot| *slot == Some(id))
    }

    /// 現在のスロット内容のスナップショットを返す.
    pub fn snapshot(&self) -> BitmapSnapshot {
        BitmapSnapshot(self.slots.clone())
    }
}

/// ビットマップの読み取り専用スナップショット.
///
/// パーティション毎の所有者タグを添字順に保持している.
///
/// `Display`実装は、タグを空白区切りで並べたブラケット表記
/// (e.g., `[a a _ b]`)を生成する. 空きスロットは`_`で表される.
/// この表記は人間による確認専用であり、機械的に読み戻されることは想定していない.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapSnapshot(Vec<Option<ProcessId>>);
impl BitmapSnapshot {
    /// パーティション毎の所有者タグを添字順に返す.
    ///
    /// `None`は空きスロットを意味する.
    pub fn tags(&self) -> &[Option<ProcessId>] {
        &self.0
    }
}
impl fmt::Display for BitmapSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, slot) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            match slot {
                Some(id) => write!(f, "{}", id)?,
                None => write!(f, "{}", FREE_TAG)?,
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> ProcessId {
        s.parse().unwrap()
    }

    fn run(start: u32, count: u32) -> PartitionRun {
        PartitionRun { start, count }
    }

    #[test]
    fn first_fit_prefers_earliest_run() {
        let mut bitmap = OwnerBitmap::new(8);
        assert_eq!(bitmap.first_fit(1), Some(0));
        assert_eq!(bitmap.first_fit(8), Some(0));
        assert_eq!(bitmap.first_fit(9), None);

        // [_ a _ _ b _ _ _]
        bitmap.fill(run(1, 1), pid("a"));
        bitmap.fill(run(4, 1), pid("b"));
        assert_eq!(bitmap.first_fit(1), Some(0));
        assert_eq!(bitmap.first_fit(2), Some(2));
        assert_eq!(bitmap.first_fit(3), Some(5));
        assert_eq!(bitmap.first_fit(4), None);

        bitmap.clear(run(1, 1));
        assert_eq!(bitmap.first_fit(4), Some(0));
    }

    #[test]
    fn first_fit_matches_run_ending_at_tail() {
        let mut bitmap = OwnerBitmap::new(4);
        bitmap.fill(run(0, 2), pid("a"));
        assert_eq!(bitmap.first_fit(2), Some(2));
        assert_eq!(bitmap.first_fit(3), None);
    }

    #[test]
    fn ownership_check() {
        let mut bitmap = OwnerBitmap::new(4);
        bitmap.fill(run(1, 2), pid("a"));
        assert!(bitmap.is_run_owned_by(run(1, 2), pid("a")));
        assert!(!bitmap.is_run_owned_by(run(1, 2), pid("b")));
        assert!(!bitmap.is_run_owned_by(run(0, 2), pid("a")));
        assert!(!bitmap.is_run_owned_by(run(3, 2), pid("a")));
    }

    #[test]
    fn snapshot_rendering() {
        let mut bitmap = OwnerBitmap::new(5);
        bitmap.fill(run(0, 2), pid("a"));
        bitmap.fill(run(3, 1), pid("b"));

        let snapshot = bitmap.snapshot();
        assert_eq!(snapshot.to_string(), "[a a _ b _]");
        assert_eq!(snapshot.tags().len(), 5);
        assert_eq!(snapshot.tags()[0], Some(pid("a")));
        assert_eq!(snapshot.tags()[2], None);

        // 変更が無ければスナップショットは同一のまま
        assert_eq!(bitmap.snapshot(), snapshot);
    }
}
