//! Cycle-safe traversal of object graphs.
//!
//! Every value reachable from the root is visited at most once. Identity is
//! the address of the value plus its [`TypeId`], so a struct and its first
//! field are told apart. Zero-sized values have no identity and are always
//! visited.
//!
//! Containers are entered the following way:
//!
//! - `None` is skipped, `Some(x)`, `Box` and `Arc` are looked through.
//! - Maps visit every key and value, collections every element.
//! - Beans visit the value of every readable, non-transient property.
//! - Shared values are read-locked while their subtree is visited.
//!
//! A callback returning `false` stops the whole traversal.
//!
//! ```
//! use std::sync::Arc;
//! use cm_bean::visit;
//!
//! let graph = vec![Some(Arc::new(3_u8)), None];
//! let mut seen = Vec::new();
//! let done = visit::visit_typed::<u8>(&graph, |x| {
//!     seen.push(*x);
//!     true
//! });
//! assert!(done);
//! assert_eq!(seen, [3]);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;

use cm_utils::hash::HashSet;
use log::{debug, warn};

use crate::value::address_of;
use crate::{Bean, PropertyDescriptor, PropertyValue, Value, ValueRef};

// -----------------------------------------------------------------------------
// VisitCallback

/// Receives the values of a traversal.
pub trait VisitCallback {
    /// Called for every value matching the filter.
    fn value(&mut self, _value: &dyn Value) -> bool {
        true
    }

    /// Called for every traversed property of a bean matching the filter,
    /// before its value is visited.
    fn property(&mut self, _bean: &dyn Bean, _property: &PropertyDescriptor, _value: &dyn Value) -> bool {
        true
    }
}

struct ValueFn<F>(F);

impl<F: FnMut(&dyn Value) -> bool> VisitCallback for ValueFn<F> {
    #[inline]
    fn value(&mut self, value: &dyn Value) -> bool {
        (self.0)(value)
    }
}

struct PropertyFn<F>(F);

impl<F> VisitCallback for PropertyFn<F>
where
    F: FnMut(&dyn Bean, &PropertyDescriptor, &dyn Value) -> bool,
{
    #[inline]
    fn property(&mut self, bean: &dyn Bean, property: &PropertyDescriptor, value: &dyn Value) -> bool {
        (self.0)(bean, property, value)
    }
}

// -----------------------------------------------------------------------------
// Visitor

/// Traversal options.
///
/// ```
/// use cm_bean::visit::Visitor;
///
/// let values = vec![1_i32, 2, 3];
/// let mut sum = 0;
/// Visitor::new().of_type::<i32>().visit(&values, |value| {
///     sum += value.downcast_ref::<i32>().copied().unwrap_or(0);
///     true
/// });
/// assert_eq!(sum, 6);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Visitor {
    filter: Option<TypeId>,
    include_transient: bool,
}

impl Visitor {
    #[inline]
    pub const fn new() -> Self {
        Self {
            filter: None,
            include_transient: false,
        }
    }

    /// Only report values of type `T`, and properties declared by `T`.
    #[inline]
    pub fn of_type<T: Value>(self) -> Self {
        self.filter(Some(TypeId::of::<T>()))
    }

    #[inline]
    pub const fn filter(mut self, filter: Option<TypeId>) -> Self {
        self.filter = filter;
        self
    }

    /// Also traverse transient properties.
    #[inline]
    pub const fn include_transient(mut self, include: bool) -> Self {
        self.include_transient = include;
        self
    }

    pub fn visit(&self, root: &dyn Value, predicate: impl FnMut(&dyn Value) -> bool) -> bool {
        self.visit_with(root, &mut ValueFn(predicate))
    }

    pub fn visit_properties(
        &self,
        root: &dyn Value,
        predicate: impl FnMut(&dyn Bean, &PropertyDescriptor, &dyn Value) -> bool,
    ) -> bool {
        self.visit_with(root, &mut PropertyFn(predicate))
    }

    /// Returns `true` when the traversal ran to completion.
    pub fn visit_with(&self, root: &dyn Value, callback: &mut dyn VisitCallback) -> bool {
        let mut traversal = Traversal {
            options: *self,
            visited: HashSet::default(),
            keep_alive: Vec::new(),
            callback,
        };
        let completed = traversal.visit_value(root);
        if !completed {
            debug!("traversal of `{}` stopped early", root.value_type_path());
        }
        completed
    }
}

// -----------------------------------------------------------------------------
// Functions

/// Visits every value of type `filter`, or every value when `filter` is
/// `None`.
pub fn visit(
    root: &dyn Value,
    predicate: impl FnMut(&dyn Value) -> bool,
    filter: Option<TypeId>,
) -> bool {
    Visitor::new().filter(filter).visit(root, predicate)
}

/// Visits every value of type `T`.
pub fn visit_typed<T: Value>(root: &dyn Value, mut predicate: impl FnMut(&T) -> bool) -> bool {
    Visitor::new()
        .of_type::<T>()
        .visit(root, |value| value.downcast_ref::<T>().is_none_or(&mut predicate))
}

/// Visits every traversed property with its declaring bean.
pub fn visit_properties(
    root: &dyn Value,
    predicate: impl FnMut(&dyn Bean, &PropertyDescriptor, &dyn Value) -> bool,
) -> bool {
    Visitor::new().visit_properties(root, predicate)
}

pub fn visit_with(root: &dyn Value, callback: &mut dyn VisitCallback, filter: Option<TypeId>) -> bool {
    Visitor::new().filter(filter).visit_with(root, callback)
}

// -----------------------------------------------------------------------------
// Traversal

struct Traversal<'c> {
    options: Visitor,
    visited: HashSet<(usize, TypeId)>,
    // Values computed by getters. Their addresses must not be reused while
    // the traversal runs.
    keep_alive: Vec<Box<dyn Value>>,
    callback: &'c mut dyn VisitCallback,
}

impl Traversal<'_> {
    #[inline]
    fn matches(&self, type_id: TypeId) -> bool {
        self.options.filter.is_none_or(|filter| filter == type_id)
    }

    /// Returns `false` when `value` was already visited.
    fn mark(&mut self, value: &dyn Value) -> bool {
        if size_of_val(value) == 0 {
            return true;
        }
        self.visited.insert((address_of(value), value.ty_id()))
    }

    fn visit_value(&mut self, value: &dyn Value) -> bool {
        let view = value.value_ref();
        let payload = match view {
            ValueRef::Optional(None) => return true,
            ValueRef::Optional(Some(inner)) => return self.visit_value(inner),
            other => match other.payload() {
                Some(payload) => payload,
                None => return true,
            },
        };

        if !self.mark(payload) {
            return true;
        }

        if let ValueRef::Shared(shared) = view {
            let mut completed = true;
            shared.read_with(&mut |inner: &dyn Value| completed = self.visit_value(inner));
            return completed;
        }

        if self.matches(payload.ty_id()) && !self.callback.value(payload) {
            return false;
        }

        match view {
            ValueRef::Collection(collection) => {
                collection.iter_values().all(|element| self.visit_value(element))
            }
            ValueRef::Map(map) => map
                .iter_entries()
                .all(|(key, value)| self.visit_value(key) && self.visit_value(value)),
            ValueRef::Bean(bean) => self.visit_bean(bean),
            _ => true,
        }
    }

    fn visit_bean(&mut self, bean: &dyn Bean) -> bool {
        let info = bean.bean_info();
        let this: &dyn Value = bean;
        let report = self.matches(info.ty().id());

        for property in info.properties() {
            if !property.is_readable() || (property.is_transient() && !self.options.include_transient) {
                continue;
            }

            let value = match property.read(this) {
                Ok(Some(value)) => value,
                Ok(None) => continue,
                Err(err) => {
                    warn!("skipping `{}.{}`: {err}", info.name(), property.name());
                    continue;
                }
            };

            if is_self_reference(this, &*value) {
                continue;
            }

            if report && !self.callback.property(bean, property, &*value) {
                return false;
            }

            let completed = self.visit_value(&*value);
            if let PropertyValue::Owned(owned) = value {
                self.keep_alive.push(owned);
            }
            if !completed {
                return false;
            }
        }
        true
    }
}

fn is_self_reference(bean: &dyn Value, value: &dyn Value) -> bool {
    let same = address_of(bean) == address_of(value) && bean.ty_id() == value.ty_id();
    same || value.value_eq(bean) == Some(true)
}
