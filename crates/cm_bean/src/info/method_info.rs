use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;

use crate::info::TypeDesc;
use crate::{InvokeError, PropertyValue, Value};

/// Erased `&self` accessor without parameters.
pub type ReadFn = for<'a> fn(&'a dyn Value) -> Result<PropertyValue<'a>, InvokeError>;

/// Erased `&mut self` accessor taking one argument.
pub type WriteFn = fn(&mut dyn Value, Box<dyn Value>) -> Result<(), InvokeError>;

// -----------------------------------------------------------------------------
// Method shape

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Receiver {
    /// `&self`
    Ref,
    /// `&mut self`
    Mut,
}

/// What a method returns.
#[derive(Clone, Copy)]
pub enum Returns {
    /// `()` or no return type.
    Unit,
    /// `&mut Self`, as returned by fluent setters.
    SelfRef,
    /// Any other type.
    Value(fn() -> TypeDesc),
}

impl fmt::Debug for Returns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => f.write_str("()"),
            Self::SelfRef => f.write_str("&mut Self"),
            Self::Value(ty) => write!(f, "{:?}", ty()),
        }
    }
}

/// How a registered method can be called dynamically.
#[derive(Clone, Copy)]
pub enum Invoker {
    /// Registered for lookup only.
    None,
    Read(ReadFn),
    Write(WriteFn),
}

// -----------------------------------------------------------------------------
// MethodInfo

/// A method registered by [`#[bean_methods]`](crate::bean_methods).
///
/// Only methods with a `&self` or `&mut self` receiver and at most one
/// parameter are registered. Getter-shaped methods (`&self`, no parameter,
/// non-unit return) get a [`Invoker::Read`], setter-shaped ones (`&mut self`,
/// one parameter, returning `()` or `&mut Self`) a [`Invoker::Write`].
#[derive(Clone, Copy)]
pub struct MethodInfo {
    name: &'static str,
    receiver: Receiver,
    param: Option<fn() -> TypeDesc>,
    returns: Returns,
    invoker: Invoker,
    transient: bool,
}

impl MethodInfo {
    #[inline]
    pub const fn new(
        name: &'static str,
        receiver: Receiver,
        param: Option<fn() -> TypeDesc>,
        returns: Returns,
        invoker: Invoker,
    ) -> Self {
        Self {
            name,
            receiver,
            param,
            returns,
            invoker,
            transient: false,
        }
    }

    /// Marks the property read through this method as transient.
    #[inline]
    pub const fn with_transient(mut self, transient: bool) -> Self {
        self.transient = transient;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn receiver(&self) -> Receiver {
        self.receiver
    }

    #[inline]
    pub fn param(&self) -> Option<TypeDesc> {
        self.param.map(|ty| ty())
    }

    #[inline]
    pub fn param_is(&self, type_id: TypeId) -> bool {
        self.param.is_some_and(|ty| ty().id() == type_id)
    }

    #[inline]
    pub const fn returns(&self) -> Returns {
        self.returns
    }

    /// The returned type, unless the method returns `()` or `&mut Self`.
    #[inline]
    pub fn return_type(&self) -> Option<TypeDesc> {
        match self.returns {
            Returns::Value(ty) => Some(ty()),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_transient(&self) -> bool {
        self.transient
    }

    #[inline]
    pub const fn invoker(&self) -> Invoker {
        self.invoker
    }

    #[inline]
    pub const fn is_reader(&self) -> bool {
        matches!(self.invoker, Invoker::Read(_))
    }

    #[inline]
    pub const fn is_writer(&self) -> bool {
        matches!(self.invoker, Invoker::Write(_))
    }

    /// Calls a getter-shaped method on `this`.
    pub fn read<'a>(&self, this: &'a dyn Value) -> Result<PropertyValue<'a>, InvokeError> {
        match self.invoker {
            Invoker::Read(read) => read(this),
            _ => Err(InvokeError::NotAccessor { method: self.name }),
        }
    }

    /// Calls a setter-shaped method on `this`.
    pub fn write(&self, this: &mut dyn Value, value: Box<dyn Value>) -> Result<(), InvokeError> {
        match self.invoker {
            Invoker::Write(write) => write(this, value),
            _ => Err(InvokeError::NotAccessor { method: self.name }),
        }
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let receiver = match self.receiver {
            Receiver::Ref => "&self",
            Receiver::Mut => "&mut self",
        };
        write!(f, "fn {}({receiver}", self.name)?;
        if let Some(param) = self.param() {
            write!(f, ", {param:?}")?;
        }
        write!(f, ") -> {:?}", self.returns)
    }
}

// -----------------------------------------------------------------------------
// MethodRegistration

/// The methods of one `#[bean_methods]` impl block, collected through
/// [`inventory`].
pub struct MethodRegistration {
    owner: TypeId,
    methods: &'static [MethodInfo],
}

impl MethodRegistration {
    #[inline]
    pub const fn new(owner: TypeId, methods: &'static [MethodInfo]) -> Self {
        Self { owner, methods }
    }

    #[inline]
    pub const fn owner(&self) -> TypeId {
        self.owner
    }

    #[inline]
    pub const fn methods(&self) -> &'static [MethodInfo] {
        self.methods
    }
}

inventory::collect!(MethodRegistration);
