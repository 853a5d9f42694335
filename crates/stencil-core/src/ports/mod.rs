//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! ライブツリー、差分マージ、attach/detach 監視、フレームスケジューラは
//! すべて外部の能力として trait で受け取ります。
//!
//! # 設計原則
//! - シングルスレッド前提（`Rc` ベース、`Send` を要求しない）
//! - コアは port の実装の詳細を知らない

pub mod host_tree;
pub mod reconciler;
pub mod lifecycle;
pub mod frame_scheduler;
pub mod clock;
pub mod id_generator;

pub use self::host_tree::HostTree;
pub use self::reconciler::Reconciler;
pub use self::lifecycle::{Callback, LifecycleObserver};
pub use self::frame_scheduler::{FrameCallback, FrameScheduler};
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
