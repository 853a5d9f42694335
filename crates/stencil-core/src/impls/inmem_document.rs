//! InMemoryDocument - 開発用・テスト用のライブツリー
//!
//! # 学習ポイント
//! - MutationObserver 風の「記録してからまとめて配送」モデル
//! - 配送中は RefCell の borrow を持たない（コールバックが再入できるように）
//!
//! # 配送の流れ
//! 1. `append_child` / `remove_child` などが mutation record を積む
//! 2. `flush_mutations` が record を順に取り出す
//! 3. removed record: その subtree 内の監視ノードに on_detach
//! 4. added record: その subtree 内の監視ノードに on_attach
//!
//! 並び替え（移動）は removed + added のペアになります。

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::domain::{Node, TreeError, WeakNode};
use crate::ports::{Callback, HostTree, LifecycleObserver};

#[derive(Debug, Clone)]
enum MutationRecord {
    Added(Node),
    Removed(Node),
}

struct Observation {
    node: WeakNode,
    on_attach: Callback,
    on_detach: Callback,
}

/// InMemoryDocument は `body` 要素を root に持つライブツリー
///
/// # 使用例
/// ```ignore
/// let document = Rc::new(InMemoryDocument::new());
/// document.append_child(&document.body(), &node)?;
/// document.flush_mutations();
/// ```
pub struct InMemoryDocument {
    body: Node,
    records: RefCell<VecDeque<MutationRecord>>,
    observations: RefCell<Vec<Observation>>,
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self {
            body: Node::element("body"),
            records: RefCell::new(VecDeque::new()),
            observations: RefCell::new(Vec::new()),
        }
    }

    pub fn body(&self) -> Node {
        self.body.clone()
    }

    /// Whether `node` is attached under `body`.
    pub fn is_connected(&self, node: &Node) -> bool {
        self.body.contains(node)
    }

    pub fn append_child(&self, parent: &Node, child: &Node) -> Result<(), TreeError> {
        self.insert_before(parent, child, None)
    }

    pub fn insert_before(
        &self,
        parent: &Node,
        child: &Node,
        reference: Option<&Node>,
    ) -> Result<(), TreeError> {
        if reference.is_some_and(|r| r.ptr_eq(child)) {
            return Ok(());
        }
        let was_connected = self.is_connected(child);
        parent.insert_before(child, reference)?;
        if was_connected {
            self.record(MutationRecord::Removed(child.clone()));
        }
        if self.is_connected(child) {
            self.record(MutationRecord::Added(child.clone()));
        }
        Ok(())
    }

    pub fn remove_child(&self, parent: &Node, child: &Node) -> Result<(), TreeError> {
        let was_connected = self.is_connected(child);
        parent.remove_child(child)?;
        if was_connected {
            self.record(MutationRecord::Removed(child.clone()));
        }
        Ok(())
    }

    /// `parent` の子リストを `children` に置き換える
    ///
    /// 既に正しい位置にある子には触れません。位置が違う子は移動になり、
    /// 接続済みなら removed + added の record が出ます。
    pub fn replace_children(&self, parent: &Node, children: &[Node]) -> Result<(), TreeError> {
        for current in parent.children() {
            if !children.iter().any(|c| c.ptr_eq(&current)) {
                self.remove_child(parent, &current)?;
            }
        }
        for (index, child) in children.iter().enumerate() {
            let existing = parent.children();
            match existing.get(index) {
                Some(at) if at.ptr_eq(child) => {}
                at => self.insert_before(parent, child, at)?,
            }
        }
        Ok(())
    }

    /// Number of queued mutation records.
    pub fn pending_mutations(&self) -> usize {
        self.records.borrow().len()
    }

    /// Number of live observations.
    pub fn observation_count(&self) -> usize {
        self.observations
            .borrow()
            .iter()
            .filter(|o| o.node.upgrade().is_some())
            .count()
    }

    /// 積まれた mutation record を監視者へ配送する
    ///
    /// 配送中に積まれた record も同じ呼び出しの中で配送します。
    /// 戻り値は呼び出したコールバックの数。
    pub fn flush_mutations(&self) -> usize {
        let mut delivered = 0;
        loop {
            let Some(record) = self.records.borrow_mut().pop_front() else {
                break;
            };
            let targets = self.targets(&record);
            for callback in targets {
                callback();
                delivered += 1;
            }
        }
        tracing::trace!(delivered, "mutations flushed");
        delivered
    }

    fn targets(&self, record: &MutationRecord) -> Vec<Callback> {
        let mut observations = self.observations.borrow_mut();
        observations.retain(|o| o.node.upgrade().is_some());
        observations
            .iter()
            .filter_map(|o| {
                let observed = o.node.upgrade()?;
                match record {
                    MutationRecord::Added(node) if node.contains(&observed) => {
                        Some(o.on_attach.clone())
                    }
                    MutationRecord::Removed(node) if node.contains(&observed) => {
                        Some(o.on_detach.clone())
                    }
                    _ => None,
                }
            })
            .collect()
    }

    fn record(&self, record: MutationRecord) {
        tracing::trace!(?record, "mutation recorded");
        self.records.borrow_mut().push_back(record);
    }
}

impl Default for InMemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HostTree for InMemoryDocument {
    fn find_by_id(&self, id: &str) -> Option<Node> {
        let mut stack = vec![self.body.clone()];
        while let Some(node) = stack.pop() {
            if node.id().as_deref() == Some(id) {
                return Some(node);
            }
            // document order: push children in reverse
            stack.extend(node.children().into_iter().rev());
        }
        None
    }
}

impl LifecycleObserver for InMemoryDocument {
    fn observe(&self, node: &Node, on_attach: Callback, on_detach: Callback) {
        self.observations.borrow_mut().push(Observation {
            node: node.downgrade(),
            on_attach,
            on_detach,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn recorder(
        document: &InMemoryDocument,
        node: &Node,
    ) -> Rc<RefCell<Vec<&'static str>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let attach = events.clone();
        let detach = events.clone();
        document.observe(
            node,
            Rc::new(move || attach.borrow_mut().push("attach")),
            Rc::new(move || detach.borrow_mut().push("detach")),
        );
        events
    }

    #[test]
    fn find_by_id_only_sees_connected_nodes() {
        let document = InMemoryDocument::new();
        let node = Node::element("div").with_id("target");

        assert!(document.find_by_id("target").is_none());

        document.append_child(&document.body(), &node).unwrap();
        let found = document.find_by_id("target").unwrap();
        assert!(found.ptr_eq(&node));
    }

    #[test]
    fn find_by_id_returns_first_in_document_order() {
        let document = InMemoryDocument::new();
        let first = Node::element("div").with_id("dup");
        let wrapper = Node::element("div").with_child(Node::element("span").with_id("dup"));
        document.append_child(&document.body(), &wrapper).unwrap();
        document
            .insert_before(&document.body(), &first, Some(&wrapper))
            .unwrap();

        assert!(document.find_by_id("dup").unwrap().ptr_eq(&first));
    }

    #[test]
    fn attach_and_detach_are_delivered_on_flush() {
        let document = InMemoryDocument::new();
        let node = Node::element("div");
        let events = recorder(&document, &node);

        document.append_child(&document.body(), &node).unwrap();
        assert!(events.borrow().is_empty());
        assert_eq!(document.flush_mutations(), 1);
        assert_eq!(*events.borrow(), vec!["attach"]);

        document.remove_child(&document.body(), &node).unwrap();
        document.flush_mutations();
        assert_eq!(*events.borrow(), vec!["attach", "detach"]);
    }

    #[test]
    fn observed_descendants_are_notified() {
        let document = InMemoryDocument::new();
        let inner = Node::element("span");
        let outer = Node::element("div").with_child(inner.clone());
        let events = recorder(&document, &inner);

        document.append_child(&document.body(), &outer).unwrap();
        document.flush_mutations();

        assert_eq!(*events.borrow(), vec!["attach"]);
    }

    #[test]
    fn moving_a_connected_node_records_a_pair() {
        let document = InMemoryDocument::new();
        let a = Node::element("div");
        let b = Node::element("div");
        document.append_child(&document.body(), &a).unwrap();
        document.append_child(&document.body(), &b).unwrap();
        document.flush_mutations();
        let events = recorder(&document, &a);

        document.append_child(&document.body(), &a).unwrap();

        assert_eq!(document.pending_mutations(), 2);
        document.flush_mutations();
        assert_eq!(*events.borrow(), vec!["detach", "attach"]);
    }

    #[test]
    fn disconnected_mutations_are_not_recorded() {
        let document = InMemoryDocument::new();
        let parent = Node::element("div");
        let child = Node::element("span");

        document.append_child(&parent, &child).unwrap();

        assert_eq!(document.pending_mutations(), 0);
    }

    #[test]
    fn replace_children_keeps_nodes_in_place() {
        let document = InMemoryDocument::new();
        let list = Node::element("ul");
        document.append_child(&document.body(), &list).unwrap();
        let a = Node::element("li").with_id("a");
        let b = Node::element("li").with_id("b");
        let c = Node::element("li").with_id("c");
        document
            .replace_children(&list, &[a.clone(), b.clone(), c.clone()])
            .unwrap();
        document.flush_mutations();

        document.replace_children(&list, &[a.clone(), c.clone()]).unwrap();

        let ids: Vec<_> = list.children().iter().filter_map(Node::id).collect();
        assert_eq!(ids, vec!["a", "c"]);
        // only b was touched
        assert_eq!(document.pending_mutations(), 1);
    }

    #[test]
    fn dropped_nodes_are_pruned() {
        let document = InMemoryDocument::new();
        {
            let node = Node::element("div");
            let _events = recorder(&document, &node);
            assert_eq!(document.observation_count(), 1);
        }
        assert_eq!(document.observation_count(), 0);
    }
}
