//! Reconciler port - ツリーの差分マージ
//!
//! 差分アルゴリズムそのものは範囲外です。コアは「いつ呼ぶか」だけを決めます。

use crate::domain::Node;

/// Reconciler mutates `live` in place until it has the shape of `desired`.
///
/// Implementations should keep `live` itself (same handle) and preserve the
/// identity of its descendants where possible. Children of `desired` for which
/// `is_same_node` reports a match against a live child must keep that live child.
pub trait Reconciler {
    fn reconcile(&self, live: &Node, desired: &Node);
}
