//! Component trait - 具体的なコンポーネントが実装する拡張面
//!
//! # 必須
//! - `create_element`: 引数からツリー断片を構築
//! - `update`: 新しい引数でライブノードを更新すべきか判定
//!
//! どちらもデフォルト実装は `NotImplemented` を返します。
//!
//! # 任意
//! - `before_render` / `after_update`: 同期 hook
//! - `load` / `unload`: 次フレームで呼ばれるライフサイクル hook（`hooks()` で宣言）

use bitflags::bitflags;

use crate::domain::{ComponentError, Node};

bitflags! {
    /// Lifecycle hooks a component defines.
    ///
    /// Attach/detach observation is only registered when at least one is set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Hooks: u8 {
        const LOAD = 1 << 0;
        const UNLOAD = 1 << 1;
    }
}

/// Component は ComponentInstance に包まれて描画される
///
/// # 使用例
/// ```ignore
/// struct Label;
///
/// impl Component for Label {
///     type Args = str;
///
///     fn create_element(&mut self, text: &str) -> Result<Node, ComponentError> {
///         Ok(Node::element("span").with_child(Node::text(text)))
///     }
///
///     fn update(&mut self, _text: &str) -> Result<bool, ComponentError> {
///         Ok(true)
///     }
/// }
/// ```
pub trait Component {
    /// render に渡す引数。複数なら tuple、可変長ならスライスを使う
    type Args: ?Sized;

    fn create_element(&mut self, _args: &Self::Args) -> Result<Node, ComponentError> {
        Err(ComponentError::NotImplemented {
            operation: "create_element",
        })
    }

    fn update(&mut self, _args: &Self::Args) -> Result<bool, ComponentError> {
        Err(ComponentError::NotImplemented {
            operation: "update",
        })
    }

    /// Called with the freshly built node before it is returned from a fresh mount.
    fn before_render(&mut self, _element: &Node) {}

    /// Called with the live node after it was reconciled.
    fn after_update(&mut self, _element: &Node) {}

    fn hooks(&self) -> Hooks {
        Hooks::empty()
    }

    fn load(&mut self) {}

    fn unload(&mut self) {}
}
