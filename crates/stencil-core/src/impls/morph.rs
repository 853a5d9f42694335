//! MorphReconciler - 開発用の簡易差分マージ
//!
//! 本番品質の diff ではありません。コアを動かすための最小限の morph です。
//!
//! # 子の対応付け（desired の各子について順に）
//! 1. `is_same_node` が一致するライブの子 → そのまま残す（placeholder はここで解決される）
//! 2. 同じ位置に同じ種類・同じ id のライブの子 → 再帰的に morph
//! 3. それ以外 → desired の子をそのまま採用
//!
//! 子リストの変更は document 経由で行うので mutation record が出ます。

use std::rc::Rc;

use crate::domain::{Node, NodeKind};
use crate::impls::InMemoryDocument;
use crate::ports::Reconciler;

pub struct MorphReconciler {
    document: Rc<InMemoryDocument>,
}

impl MorphReconciler {
    pub fn new(document: Rc<InMemoryDocument>) -> Self {
        Self { document }
    }

    fn morph_node(&self, live: &Node, desired: &Node) {
        match desired.kind() {
            NodeKind::Text { content } => live.set_text(content),
            NodeKind::Element { .. } => {
                live.replace_attributes(desired.attributes());
                self.morph_children(live, desired);
            }
        }
    }

    fn morph_children(&self, live: &Node, desired: &Node) {
        let current = live.children();
        let mut next: Vec<Node> = Vec::with_capacity(desired.child_count());

        for (index, wanted) in desired.children().iter().enumerate() {
            if let Some(same) = current
                .iter()
                .find(|c| wanted.is_same_node(c) && !claimed(&next, c))
            {
                next.push(same.clone());
                continue;
            }

            match current.get(index) {
                Some(candidate)
                    if !claimed(&next, candidate)
                        && !wanted.is_placeholder()
                        && same_shape(candidate, wanted) =>
                {
                    self.morph_node(candidate, wanted);
                    next.push(candidate.clone());
                }
                _ => next.push(wanted.clone()),
            }
        }

        if let Err(err) = self.document.replace_children(live, &next) {
            tracing::warn!(error = %err, "morph could not replace children");
        }
    }
}

impl Reconciler for MorphReconciler {
    fn reconcile(&self, live: &Node, desired: &Node) {
        if live.tag() != desired.tag() {
            tracing::warn!(?live, ?desired, "reconciling nodes of different kinds");
        }
        self.morph_node(live, desired);
    }
}

fn claimed(next: &[Node], node: &Node) -> bool {
    next.iter().any(|n| n.ptr_eq(node))
}

/// Same kind of node and, for elements, same tag and id.
fn same_shape(a: &Node, b: &Node) -> bool {
    match (a.kind(), b.kind()) {
        (NodeKind::Text { .. }, NodeKind::Text { .. }) => true,
        (NodeKind::Element { tag: x }, NodeKind::Element { tag: y }) => x == y && a.id() == b.id(),
        _ => false,
    }
}
