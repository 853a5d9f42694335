//! Host - ライブツリー環境の port 一式

use std::rc::Rc;

use crate::impls::{FrameQueue, InMemoryDocument, MorphReconciler};
use crate::ports::{FrameScheduler, HostTree, LifecycleObserver, Reconciler};

/// Everything a component instance needs from a live host environment.
#[derive(Clone)]
pub struct Host {
    pub tree: Rc<dyn HostTree>,
    pub reconciler: Rc<dyn Reconciler>,
    pub observer: Rc<dyn LifecycleObserver>,
    pub scheduler: Rc<dyn FrameScheduler>,
}

impl Host {
    pub fn new(
        tree: Rc<dyn HostTree>,
        reconciler: Rc<dyn Reconciler>,
        observer: Rc<dyn LifecycleObserver>,
        scheduler: Rc<dyn FrameScheduler>,
    ) -> Self {
        Self {
            tree,
            reconciler,
            observer,
            scheduler,
        }
    }

    /// In-memory document + morph + frame queue.
    pub fn in_memory(document: &Rc<InMemoryDocument>, frames: &Rc<FrameQueue>) -> Self {
        Self {
            tree: document.clone(),
            reconciler: Rc::new(MorphReconciler::new(document.clone())),
            observer: document.clone(),
            scheduler: frames.clone(),
        }
    }
}
