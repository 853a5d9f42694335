//! Domain model (nodes, IDs, identity state, errors).

pub mod errors;
pub mod identity;
pub mod ids;
pub mod node;

pub use self::errors::{ComponentError, ContractViolation, ErrorKind, TreeError};
pub use self::identity::IdentityState;
pub use self::ids::ComponentId;
pub use self::node::{BRAND_ATTR, ID_ATTR, Node, NodeKind, NodeSnapshot, PROXY_ATTR, WeakNode};
