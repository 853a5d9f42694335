//! stencil-core
//!
//! Stateful, re-renderable components over a live document tree.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（Node, ComponentId, IdentityState, errors）
//! - **ports**: 抽象化レイヤー（HostTree, Reconciler, LifecycleObserver, FrameScheduler, Clock, IdGenerator）
//! - **impls**: 実装（InMemoryDocument, MorphReconciler, FrameQueue など開発用）
//! - **app**: Component trait と ComponentInstance（render のディスパッチ）
//! - **config**: StencilConfig

pub mod domain;
pub mod ports;
pub mod impls;
pub mod app;
pub mod config;

pub use app::{BuildError, Component, ComponentInstance, Hooks, Host, InstanceBuilder};
pub use config::{ConfigError, StencilConfig};
pub use domain::{ComponentError, ContractViolation, Node, NodeSnapshot};
