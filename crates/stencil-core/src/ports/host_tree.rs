//! HostTree port - ライブツリーの参照
//!
//! コアは「自分のノードがまだライブか」をこの port 経由でだけ確認します。

use crate::domain::Node;

/// HostTree は id でライブツリーのノードを探す
pub trait HostTree {
    /// Look up a connected node by its `id` attribute.
    fn find_by_id(&self, id: &str) -> Option<Node>;
}
