//! LifecycleObserver port - attach/detach の通知
//!
//! # 設計原則
//! - コールバックはインスタンスを Weak で捕捉したクロージャ（呼び出し文脈はクロージャが持つ）
//! - 通知は重複しうる（並び替えで detach → attach のペアが出る）。debounce は呼び出し側の責務

use std::rc::Rc;

use crate::domain::Node;

/// Notification callback registered with an observer.
pub type Callback = Rc<dyn Fn()>;

/// LifecycleObserver は node がライブツリーに入った／出たときにコールバックを呼ぶ
pub trait LifecycleObserver {
    fn observe(&self, node: &Node, on_attach: Callback, on_detach: Callback);
}
