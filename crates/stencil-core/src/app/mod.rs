//! App - アプリケーション層
//!
//! ports を組み合わせて render のディスパッチを実装します。
//!
//! # 主要コンポーネント
//! - **Component**: 具体的なコンポーネントが実装する trait
//! - **ComponentInstance**: render の分岐と attach/detach の debounce
//! - **InstanceBuilder**: port のワイヤリングと起動時検証
//! - **Host**: ライブツリー環境の port 一式

pub mod builder;
pub mod component;
pub mod host;
pub mod instance;


pub use self::builder::{BuildError, InstanceBuilder};
pub use self::component::{Component, Hooks};
pub use self::host::Host;
pub use self::instance::ComponentInstance;
