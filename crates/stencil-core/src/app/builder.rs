//! InstanceBuilder - ComponentInstance の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）: host の port は 4 つ全部か、ひとつもないか

use std::rc::Rc;

use super::component::Component;
use super::host::Host;
use super::instance::ComponentInstance;
use crate::ports::{
    FrameScheduler, HostTree, IdGenerator, LifecycleObserver, Reconciler, SystemClock,
    UlidGenerator,
};

/// InstanceBuilder は ComponentInstance を構築
///
/// # 使用例
/// ```ignore
/// let instance = InstanceBuilder::new(MyComponent::default())
///     .host(Host::in_memory(&document, &frames))
///     .build()?;
/// ```
///
/// port をひとつも設定しなければ host なし（構築のみ）のインスタンスになります。
pub struct InstanceBuilder<C> {
    component: C,
    tree: Option<Rc<dyn HostTree>>,
    reconciler: Option<Rc<dyn Reconciler>>,
    observer: Option<Rc<dyn LifecycleObserver>>,
    scheduler: Option<Rc<dyn FrameScheduler>>,
    ids: Option<Box<dyn IdGenerator>>,
}

/// BuildError はインスタンス構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("host environment is missing the {0} port. Configure all host ports or none.")]
    MissingHostPort(&'static str),
}

impl<C: Component + 'static> InstanceBuilder<C> {
    pub fn new(component: C) -> Self {
        Self {
            component,
            tree: None,
            reconciler: None,
            observer: None,
            scheduler: None,
            ids: None,
        }
    }

    /// Set all four host ports at once.
    pub fn host(mut self, host: Host) -> Self {
        self.tree = Some(host.tree);
        self.reconciler = Some(host.reconciler);
        self.observer = Some(host.observer);
        self.scheduler = Some(host.scheduler);
        self
    }

    pub fn host_tree(mut self, tree: Rc<dyn HostTree>) -> Self {
        self.tree = Some(tree);
        self
    }

    pub fn reconciler(mut self, reconciler: Rc<dyn Reconciler>) -> Self {
        self.reconciler = Some(reconciler);
        self
    }

    pub fn observer(mut self, observer: Rc<dyn LifecycleObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn scheduler(mut self, scheduler: Rc<dyn FrameScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Replace the default `UlidGenerator<SystemClock>`.
    pub fn id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Some(Box::new(ids));
        self
    }

    /// # 検証
    /// - host の port が一部だけ設定されていたら BuildError::MissingHostPort
    pub fn build(self) -> Result<ComponentInstance<C>, BuildError> {
        let host = match (self.tree, self.reconciler, self.observer, self.scheduler) {
            (None, None, None, None) => None,
            (Some(tree), Some(reconciler), Some(observer), Some(scheduler)) => {
                Some(Host::new(tree, reconciler, observer, scheduler))
            }
            (tree, reconciler, observer, _) => {
                let missing = if tree.is_none() {
                    "host tree"
                } else if reconciler.is_none() {
                    "reconciler"
                } else if observer.is_none() {
                    "lifecycle observer"
                } else {
                    "frame scheduler"
                };
                return Err(BuildError::MissingHostPort(missing));
            }
        };
        let ids = self
            .ids
            .unwrap_or_else(|| Box::new(UlidGenerator::new(SystemClock)));
        Ok(ComponentInstance::from_parts(self.component, host, ids))
    }
}
