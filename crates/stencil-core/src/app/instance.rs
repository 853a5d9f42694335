//! ComponentInstance - render のディスパッチとライフサイクルの debounce
//!
//! # render の分岐
//! 1. host なし → `create_element` の結果をそのまま返す（同一性の追跡なし）
//! 2. ブランド付きのライブノードがある → `update` が true なら morph、placeholder を返す
//! 3. ライブノードがない → reset して新規に構築・ブランド付け・監視登録
//!
//! # debounce
//! morph の並び替えは detach → attach のペアを生む。
//! - attach: mounted 済みなら無視
//! - detach: ノードがまだライブに見つかるなら無視
//!
//! load / unload は次のフレームに回す。予約済みの hook は取り消さない。

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use tracing::{debug, trace};

use super::builder::InstanceBuilder;
use super::component::{Component, Hooks};
use super::host::Host;
use crate::domain::{ComponentError, ComponentId, IdentityState, Node};
use crate::ports::{IdGenerator, SystemClock, UlidGenerator};

/// Stateful wrapper that decides how each `render` call is served.
///
/// Cheap to hold: the state lives behind an `Rc` that lifecycle callbacks
/// reference weakly.
pub struct ComponentInstance<C: Component> {
    inner: Rc<Inner<C>>,
}

struct Inner<C: Component> {
    host: Option<Host>,
    ids: Box<dyn IdGenerator>,
    identity: RefCell<IdentityState>,
    component: RefCell<C>,
}

impl<C: Component + 'static> ComponentInstance<C> {
    pub fn builder(component: C) -> InstanceBuilder<C> {
        InstanceBuilder::new(component)
    }

    /// Instance rendering into a live host environment.
    pub fn new(component: C, host: Host) -> Self {
        Self::from_parts(
            component,
            Some(host),
            Box::new(UlidGenerator::new(SystemClock)),
        )
    }

    /// Instance without a host: `render` only constructs.
    pub fn headless(component: C) -> Self {
        Self::from_parts(component, None, Box::new(UlidGenerator::new(SystemClock)))
    }

    pub(crate) fn from_parts(component: C, host: Option<Host>, ids: Box<dyn IdGenerator>) -> Self {
        let identity = IdentityState::new(ids.generate_component_id());
        Self {
            inner: Rc::new(Inner {
                host,
                ids,
                identity: RefCell::new(identity),
                component: RefCell::new(component),
            }),
        }
    }

    pub fn render(&self, args: &C::Args) -> Result<Node, ComponentError> {
        let Some(host) = &self.inner.host else {
            return self.inner.component.borrow_mut().create_element(args);
        };
        match self.inner.element() {
            Some(live) => self.inner.rerender(host, live, args),
            None => self.inner.mount(host, args),
        }
    }

    /// The live node this instance currently owns, looked up on every call.
    pub fn element(&self) -> Option<Node> {
        self.inner.element()
    }

    pub fn has_host(&self) -> bool {
        self.inner.host.is_some()
    }

    pub fn logical_id(&self) -> ComponentId {
        self.inner.identity.borrow().logical_id()
    }

    pub fn root_id(&self) -> Option<String> {
        self.inner.identity.borrow().root_id().map(str::to_owned)
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.identity.borrow().is_mounted()
    }

    pub fn component(&self) -> Ref<'_, C> {
        self.inner.component.borrow()
    }

    pub fn component_mut(&self) -> RefMut<'_, C> {
        self.inner.component.borrow_mut()
    }
}

impl<C: Component + 'static> Inner<C> {
    fn element(&self) -> Option<Node> {
        let host = self.host.as_ref()?;
        let root_id = self.identity.borrow().root_id()?.to_owned();
        let node = host.tree.find_by_id(&root_id)?;
        self.identity.borrow().owns(&node).then_some(node)
    }

    fn rerender(&self, host: &Host, live: Node, args: &C::Args) -> Result<Node, ComponentError> {
        let should_update = self.component.borrow_mut().update(args)?;
        debug!(
            logical_id = %self.identity.borrow().logical_id(),
            should_update,
            "render over live node"
        );
        if should_update {
            let desired = self.construct(args)?;
            host.reconciler.reconcile(&live, &desired);
            self.component.borrow_mut().after_update(&live);
        }
        Ok(self.identity.borrow_mut().placeholder())
    }

    fn mount(self: &Rc<Self>, host: &Host, args: &C::Args) -> Result<Node, ComponentError> {
        let logical_id = self.ids.generate_component_id();
        self.identity.borrow_mut().reset(logical_id);

        let node = self.construct(args)?;
        self.component.borrow_mut().before_render(&node);

        let hooks = self.component.borrow().hooks();
        if hooks.intersects(Hooks::LOAD | Hooks::UNLOAD) {
            let attach = Rc::downgrade(self);
            let detach = Rc::downgrade(self);
            host.observer.observe(
                &node,
                Rc::new(move || {
                    if let Some(inner) = attach.upgrade() {
                        inner.handle_attach();
                    }
                }),
                Rc::new(move || {
                    if let Some(inner) = detach.upgrade() {
                        inner.handle_detach();
                    }
                }),
            );
        }
        debug!(%logical_id, root_id = ?node.id(), ?hooks, "fresh mount");
        Ok(node)
    }

    /// create_element → root 検証 → id 割り当て → ブランド付け
    fn construct(&self, args: &C::Args) -> Result<Node, ComponentError> {
        let node = self.component.borrow_mut().create_element(args)?;
        let mut identity = self.identity.borrow_mut();
        identity.validate_root(&node)?;
        identity.assign_id(&node);
        identity.brand(&node);
        Ok(node)
    }

    fn handle_attach(self: &Rc<Self>) {
        {
            let mut identity = self.identity.borrow_mut();
            if identity.is_mounted() {
                trace!(logical_id = %identity.logical_id(), "duplicate attach ignored");
                return;
            }
            identity.set_mounted(true);
        }
        if self.component.borrow().hooks().contains(Hooks::LOAD) {
            self.schedule(C::load);
        }
    }

    fn handle_detach(self: &Rc<Self>) {
        if self.element().is_some() {
            trace!(
                logical_id = %self.identity.borrow().logical_id(),
                "detach ignored, node still live"
            );
            return;
        }
        self.identity.borrow_mut().set_mounted(false);
        if self.component.borrow().hooks().contains(Hooks::UNLOAD) {
            self.schedule(C::unload);
        }
    }

    fn schedule(self: &Rc<Self>, hook: fn(&mut C)) {
        let Some(host) = &self.host else {
            return;
        };
        let inner = Rc::downgrade(self);
        host.scheduler.schedule_next_frame(Box::new(move || {
            if let Some(inner) = inner.upgrade() {
                hook(&mut *inner.component.borrow_mut());
            }
        }));
    }
}
