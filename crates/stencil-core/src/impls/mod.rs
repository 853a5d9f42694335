//! Impls - 実装（開発用・テスト用）
//!
//! このモジュールには ports の実装を含めます。
//!
//! # 含まれる実装
//! - **InMemoryDocument**: HostTree + LifecycleObserver（MutationObserver 風）
//! - **MorphReconciler**: 簡易 morph
//! - **FrameQueue**: FrameScheduler
//!
//! 本番ではブラウザの DOM / morph ライブラリ / requestAnimationFrame に
//! 対応する実装を別クレートで用意します。

pub mod inmem_document;
pub mod morph;
pub mod frame_queue;

pub use self::inmem_document::InMemoryDocument;
pub use self::morph::MorphReconciler;
pub use self::frame_queue::FrameQueue;
