//! Identity - インスタンスが現在所有するノードの同一性
//!
//! `IdentityState` は branding / id 割り当て / root の種類チェック / placeholder を
//! まとめて管理します。ポートには一切触れない純粋な状態です。

use super::errors::ContractViolation;
use super::ids::ComponentId;
use super::node::{BRAND_ATTR, Node, NodeKind, PROXY_ATTR};

/// Identity state of one component instance.
#[derive(Debug)]
pub struct IdentityState {
    logical_id: ComponentId,
    brand: String,
    root_id: Option<String>,
    root_kind: Option<String>,
    placeholder: Option<Node>,
    mounted: bool,
}

impl IdentityState {
    pub fn new(logical_id: ComponentId) -> Self {
        Self {
            logical_id,
            brand: logical_id.to_string(),
            root_id: None,
            root_kind: None,
            placeholder: None,
            mounted: false,
        }
    }

    /// 新しいライフサイクルを開始する
    ///
    /// `mounted` は触りません（attach/detach の debounce はライフサイクルをまたぐ）。
    pub fn reset(&mut self, logical_id: ComponentId) {
        self.logical_id = logical_id;
        self.brand = logical_id.to_string();
        self.root_id = None;
        self.root_kind = None;
        self.placeholder = None;
    }

    pub fn logical_id(&self) -> ComponentId {
        self.logical_id
    }

    /// Value of the brand attribute for the current lifecycle.
    pub fn brand_value(&self) -> &str {
        &self.brand
    }

    pub fn root_id(&self) -> Option<&str> {
        self.root_id.as_deref()
    }

    pub fn root_kind(&self) -> Option<&str> {
        self.root_kind.as_deref()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn set_mounted(&mut self, mounted: bool) {
        self.mounted = mounted;
    }

    /// Whether `node` carries this lifecycle's brand.
    pub fn owns(&self, node: &Node) -> bool {
        node.attribute(BRAND_ATTR).as_deref() == Some(self.brand.as_str())
    }

    /// Stamp the brand attribute. Idempotent.
    pub fn brand(&self, node: &Node) {
        node.set_attribute(BRAND_ATTR, self.brand.clone());
    }

    /// 既存の id があれば root_id として採用し、なければ logical id を割り当てる
    pub fn assign_id(&mut self, node: &Node) {
        match node.id() {
            Some(id) => self.root_id = Some(id),
            None => {
                node.set_id(self.brand.clone());
                self.root_id = Some(self.brand.clone());
            }
        }
    }

    /// 最初の構築で root の種類を記録し、以降は一致を検証する
    pub fn validate_root(&mut self, node: &Node) -> Result<(), ContractViolation> {
        let tag = match node.kind() {
            NodeKind::Element { tag } => tag,
            kind @ NodeKind::Text { .. } => {
                return Err(ContractViolation::NotAnElement {
                    found: kind.to_string(),
                });
            }
        };
        if let Some(expected) = &self.root_kind {
            if *expected != tag {
                return Err(ContractViolation::RootKindChanged {
                    expected: expected.clone(),
                    found: tag,
                });
            }
        } else {
            self.root_kind = Some(tag);
        }
        Ok(())
    }

    /// Placeholder for the current lifecycle, created on first use.
    pub fn placeholder(&mut self) -> Node {
        if let Some(placeholder) = &self.placeholder {
            return placeholder.clone();
        }
        let proxy = Node::element("div").with_attr(PROXY_ATTR, "");
        self.brand(&proxy);
        if let Some(root_id) = &self.root_id {
            proxy.set_id(root_id.clone());
        }
        proxy.match_by_brand(self.brand.clone());
        self.placeholder = Some(proxy.clone());
        proxy
    }

    pub fn has_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use ulid::Ulid;

    fn state() -> IdentityState {
        IdentityState::new(ComponentId::from_ulid(Ulid::new()))
    }

    #[test]
    fn assign_id_uses_logical_id_when_missing() {
        let mut identity = state();
        let node = Node::element("div");

        identity.assign_id(&node);

        let expected = identity.logical_id().to_string();
        assert_eq!(node.id().as_deref(), Some(expected.as_str()));
        assert_eq!(identity.root_id(), Some(expected.as_str()));
    }

    #[test]
    fn assign_id_adopts_existing_id() {
        let mut identity = state();
        let node = Node::element("div").with_id("custom");

        identity.assign_id(&node);

        assert_eq!(node.id().as_deref(), Some("custom"));
        assert_eq!(identity.root_id(), Some("custom"));
    }

    #[test]
    fn brand_is_idempotent() {
        let identity = state();
        let node = Node::element("div");

        identity.brand(&node);
        identity.brand(&node);

        assert!(identity.owns(&node));
        assert_eq!(node.attributes().len(), 1);
    }

    #[rstest]
    #[case::same_tag("div", "div", true)]
    #[case::case_insensitive("div", "DIV", true)]
    #[case::different_tag("div", "span", false)]
    fn validate_root_compares_with_first_kind(
        #[case] first: &str,
        #[case] second: &str,
        #[case] accepted: bool,
    ) {
        let mut identity = state();
        identity.validate_root(&Node::element(first)).unwrap();

        let result = identity.validate_root(&Node::element(second));

        assert_eq!(result.is_ok(), accepted);
    }

    #[test]
    fn validate_root_rejects_text_nodes() {
        let mut identity = state();
        let err = identity.validate_root(&Node::text("nope")).unwrap_err();
        assert_eq!(
            err,
            ContractViolation::NotAnElement {
                found: "#text".to_string()
            }
        );
        assert_eq!(identity.root_kind(), None);
    }

    #[test]
    fn placeholder_is_cached_until_reset() {
        let mut identity = state();
        let node = Node::element("section");
        identity.validate_root(&node).unwrap();
        identity.assign_id(&node);
        identity.brand(&node);

        let first = identity.placeholder();
        let second = identity.placeholder();
        assert!(first.ptr_eq(&second));
        assert!(first.has_attribute(PROXY_ATTR));
        assert_eq!(first.id(), node.id());
        assert!(first.is_same_node(&node));

        identity.reset(ComponentId::from_ulid(Ulid::new()));
        assert!(!identity.has_placeholder());
        assert_eq!(identity.root_id(), None);
        assert_eq!(identity.root_kind(), None);
        assert!(!identity.owns(&node));
    }

    #[test]
    fn reset_keeps_mounted_flag() {
        let mut identity = state();
        identity.set_mounted(true);
        identity.reset(ComponentId::from_ulid(Ulid::new()));
        assert!(identity.is_mounted());
    }
}
