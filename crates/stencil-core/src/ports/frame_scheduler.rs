//! FrameScheduler port - 次のフレームでの実行
//!
//! ライフサイクル hook は通知ハンドラ内で同期実行せず、次のフレームに回します。

/// One-shot callback run on the next frame.
pub type FrameCallback = Box<dyn FnOnce()>;

/// FrameScheduler は次の描画フレームでコールバックを実行する
///
/// # 契約
/// - 呼び出し中のフレームでは実行しない（必ず次のフレーム）
/// - キャンセルはない
pub trait FrameScheduler {
    fn schedule_next_frame(&self, callback: FrameCallback);
}
