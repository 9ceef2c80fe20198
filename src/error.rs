/// crate固有のエラー型.
#[derive(Debug, Clone, TrackableError)]
pub struct Error(trackable::error::TrackableError<ErrorKind>);

/// 発生し得るエラーの種別.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 要求サイズを満たす空き連続領域が存在しない.
    ///
    /// アロケータ自身はリトライを行わない.
    ///
    /// # 典型的な対応策
    ///
    /// - 既存の割当が解放されるのを待ってからリトライする
    /// - 要求をキューに積む、あるいは拒否する（方針は利用側の責務）
    OutOfMemory,

    /// 指定されたIDに対応する割当済み領域が存在しない.
    ///
    /// このエラーが返された場合、ビットマップは一切変化していない.
    ///
    /// # 典型的な対応策
    ///
    /// - 渡したIDが正しいかどうかを確認する
    /// - 既に解放済みの領域に対する二重解放であれば、単に無視する
    NotFound,

    /// 入力が不正.
    ///
    /// ゼロサイズの割当要求、アリーナ全体のパーティション数を超える要求、
    /// 不正なアリーナ構成（パーティションサイズの倍数でない容量等）が該当する.
    ///
    /// # 典型的な対応策
    ///
    /// - 利用者側のプログラムを修正して入力を正しくする
    InvalidInput,

    /// 内部状態が不整合に陥っている.
    ///
    /// ビットマップと割当台帳の内容が食い違っている場合等にこのエラーが返される.
    /// プログラムにバグがあることを示している.
    ///
    /// # 典型的な対応策
    ///
    /// - バグ修正を行ってプログラムを更新する
    InconsistentState,
}
impl trackable::error::ErrorKind for ErrorKind {}
