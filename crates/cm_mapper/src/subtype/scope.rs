//! The subtype registry of the read or write running on this thread.

use alloc::sync::Arc;
use core::any::TypeId;
use core::cell::RefCell;
use std::sync::OnceLock;

use super::{SubtypeEntry, SubtypeProvider, SubtypeRegistry};
use crate::MapperError;

struct Frame {
    registry: Arc<SubtypeRegistry>,
    failure: Option<MapperError>,
}

thread_local! {
    static FRAMES: RefCell<Vec<Frame>> = const { RefCell::new(Vec::new()) };
}

/// Makes `registry` current until the guard is dropped.
pub(crate) fn enter(registry: Arc<SubtypeRegistry>) -> ScopeGuard {
    FRAMES.with_borrow_mut(|frames| frames.push(Frame { registry, failure: None }));
    ScopeGuard(())
}

#[must_use]
pub(crate) struct ScopeGuard(());

impl ScopeGuard {
    /// Leaves the scope, returning the first failure recorded in it.
    pub(crate) fn finish(self) -> Option<MapperError> {
        FRAMES.with_borrow_mut(|frames| frames.last_mut().and_then(|frame| frame.failure.take()))
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        FRAMES.with_borrow_mut(|frames| frames.pop());
    }
}

/// Records a failure that serde can only report as a message.
pub(crate) fn fail(error: MapperError) {
    FRAMES.with_borrow_mut(|frames| {
        if let Some(frame) = frames.last_mut() {
            frame.failure.get_or_insert(error);
        }
    });
}

/// Every submitted entry and provider, used outside any mapper.
fn global() -> &'static Arc<SubtypeRegistry> {
    static GLOBAL: OnceLock<Arc<SubtypeRegistry>> = OnceLock::new();
    GLOBAL.get_or_init(|| {
        let mut registry = SubtypeRegistry::submitted();
        for provider in SubtypeProvider::submitted() {
            provider.provide(&mut registry);
        }
        Arc::new(registry)
    })
}

fn with_current<R>(f: impl FnOnce(&SubtypeRegistry) -> R) -> R {
    let current = FRAMES.with_borrow(|frames| frames.last().map(|frame| Arc::clone(&frame.registry)));
    match current {
        Some(registry) => f(&registry),
        None => f(global()),
    }
}

pub(crate) fn lookup(base: TypeId, name: &str) -> Option<SubtypeEntry> {
    with_current(|registry| registry.get(base, name).copied())
}

pub(crate) fn name_of(base: TypeId, concrete: TypeId) -> Option<&'static str> {
    with_current(|registry| registry.name_of(base, concrete))
}
