//! Node - ライブツリーのノード
//!
//! `Node` は共有ハンドル（`Rc<RefCell<..>>`）です。clone しても同じノードを指します。
//! ノードの同一性は `ptr_eq` で判定し、placeholder だけは `is_same_node` を
//! ブランド属性ベースの判定に差し替えます。
//!
//! # 学習ポイント
//! - `Rc` + `Weak` による親子リンク（親への参照は Weak で循環を避ける）
//! - `RefCell` の borrow をメソッド内に閉じ込める

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use super::errors::TreeError;

/// The `id` attribute used for host tree lookups.
pub const ID_ATTR: &str = "id";

/// Brand attribute recording which logical instance produced a node.
pub const BRAND_ATTR: &str = "data-stencil";

/// Marker attribute carried by placeholder nodes.
pub const PROXY_ATTR: &str = "data-proxy";

/// NodeKind はノードの種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element { tag: String },
    Text { content: String },
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Element { tag } => write!(f, "<{tag}>"),
            NodeKind::Text { .. } => f.write_str("#text"),
        }
    }
}

/// How `is_same_node` decides identity.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Identity {
    Pointer,
    Brand(String),
}

struct NodeData {
    kind: NodeKind,
    attributes: BTreeMap<String, String>,
    children: Vec<Node>,
    parent: Weak<RefCell<NodeData>>,
    identity: Identity,
}

/// Shared handle to a mutable tree node.
#[derive(Clone)]
pub struct Node(Rc<RefCell<NodeData>>);

/// Non-owning handle to a node.
#[derive(Clone, Default)]
pub struct WeakNode(Weak<RefCell<NodeData>>);

impl WeakNode {
    pub fn upgrade(&self) -> Option<Node> {
        self.0.upgrade().map(Node)
    }
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            kind,
            attributes: BTreeMap::new(),
            children: Vec::new(),
            parent: Weak::new(),
            identity: Identity::Pointer,
        })))
    }

    /// 要素ノードを作成（タグは小文字に正規化）
    pub fn element(tag: &str) -> Self {
        Self::new(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
        })
    }

    /// テキストノードを作成
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(NodeKind::Text {
            content: content.into(),
        })
    }

    pub fn with_attr(self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.set_id(id);
        self
    }

    /// Builder-style `append_child`. Invalid insertions are logged and skipped.
    pub fn with_child(self, child: Node) -> Self {
        if let Err(err) = self.append_child(&child) {
            tracing::warn!(error = %err, parent = ?self, "with_child skipped");
        }
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.0.borrow().kind.clone()
    }

    pub fn tag(&self) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Element { tag } => Some(tag.clone()),
            NodeKind::Text { .. } => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.0.borrow().kind, NodeKind::Element { .. })
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.0.borrow().attributes.contains_key(name)
    }

    pub fn set_attribute(&self, name: &str, value: impl Into<String>) {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.into());
    }

    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        self.0.borrow_mut().attributes.remove(name)
    }

    pub fn attributes(&self) -> BTreeMap<String, String> {
        self.0.borrow().attributes.clone()
    }

    pub fn replace_attributes(&self, attributes: BTreeMap<String, String>) {
        self.0.borrow_mut().attributes = attributes;
    }

    /// The node's id. An empty id counts as no id.
    pub fn id(&self) -> Option<String> {
        self.attribute(ID_ATTR).filter(|id| !id.is_empty())
    }

    pub fn set_id(&self, id: impl Into<String>) {
        self.set_attribute(ID_ATTR, id);
    }

    /// Concatenated text of this node and all of its descendants.
    pub fn text_content(&self) -> String {
        let data = self.0.borrow();
        match &data.kind {
            NodeKind::Text { content } => content.clone(),
            NodeKind::Element { .. } => data.children.iter().map(Node::text_content).collect(),
        }
    }

    /// Replace the content of a text node. No-op on elements.
    pub fn set_text(&self, content: impl Into<String>) {
        if let NodeKind::Text { content: current } = &mut self.0.borrow_mut().kind {
            *current = content.into();
        }
    }

    pub fn children(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    pub fn parent(&self) -> Option<Node> {
        self.0.borrow().parent.upgrade().map(Node)
    }

    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn downgrade(&self) -> WeakNode {
        WeakNode(Rc::downgrade(&self.0))
    }

    /// `other` がこのノード自身か子孫なら true
    pub fn contains(&self, other: &Node) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if node.ptr_eq(self) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Identity predicate used by reconcilers.
    ///
    /// A regular node is only the same node as itself. A placeholder is the same
    /// node as anything carrying its brand.
    pub fn is_same_node(&self, other: &Node) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        match &self.0.borrow().identity {
            Identity::Pointer => false,
            Identity::Brand(brand) => other.attribute(BRAND_ATTR).as_deref() == Some(brand),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.0.borrow().identity, Identity::Brand(_))
    }

    pub(crate) fn match_by_brand(&self, brand: String) {
        self.0.borrow_mut().identity = Identity::Brand(brand);
    }

    pub fn append_child(&self, child: &Node) -> Result<(), TreeError> {
        self.insert_before(child, None)
    }

    /// `child` を `reference` の直前に挿入（None なら末尾）
    ///
    /// 既に別の親を持つ場合は先にそこから外します。
    pub fn insert_before(&self, child: &Node, reference: Option<&Node>) -> Result<(), TreeError> {
        if !self.is_element() {
            return Err(TreeError::NotAContainer);
        }
        if child.contains(self) {
            return Err(TreeError::Cycle);
        }
        if let Some(reference) = reference {
            if !reference.parent().is_some_and(|p| p.ptr_eq(self)) {
                return Err(TreeError::NotAChild);
            }
            if reference.ptr_eq(child) {
                return Ok(());
            }
        }

        child.detach();
        {
            let mut data = self.0.borrow_mut();
            let index = reference
                .and_then(|r| data.children.iter().position(|c| c.ptr_eq(r)))
                .unwrap_or(data.children.len());
            data.children.insert(index, child.clone());
        }
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        Ok(())
    }

    pub fn remove_child(&self, child: &Node) -> Result<(), TreeError> {
        if !child.parent().is_some_and(|p| p.ptr_eq(self)) {
            return Err(TreeError::NotAChild);
        }
        child.detach();
        Ok(())
    }

    fn detach(&self) {
        let parent = self.0.borrow().parent.upgrade();
        if let Some(parent) = parent {
            parent.borrow_mut().children.retain(|c| !c.ptr_eq(self));
        }
        self.0.borrow_mut().parent = Weak::new();
    }

    /// Serializable copy of this subtree.
    pub fn snapshot(&self) -> NodeSnapshot {
        let data = self.0.borrow();
        match &data.kind {
            NodeKind::Element { tag } => NodeSnapshot::Element {
                tag: tag.clone(),
                attributes: data.attributes.clone(),
                children: data.children.iter().map(Node::snapshot).collect(),
            },
            NodeKind::Text { content } => NodeSnapshot::Text {
                content: content.clone(),
            },
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(data) => f
                .debug_struct("Node")
                .field("kind", &data.kind)
                .field("attributes", &data.attributes)
                .field("children", &data.children.len())
                .finish(),
            Err(_) => f.write_str("Node(<borrowed>)"),
        }
    }
}

/// Serializable view of a node subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeSnapshot {
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<NodeSnapshot>,
    },
    Text {
        content: String,
    },
}
