use alloc::format;
use alloc::string::String;
use core::any::TypeId;

use crate::info::{MethodInfo, MethodTable, Receiver, Returns};

// -----------------------------------------------------------------------------
// ReadConvention

/// Accessor shapes tried, in order, to read property `name`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadConvention {
    /// `fn get_name(&self) -> T`
    Getter,
    /// `fn is_name(&self) -> bool`
    BooleanGetter,
    /// `fn name(&self) -> T`
    Bare,
}

impl ReadConvention {
    pub const ORDER: [Self; 3] = [Self::Getter, Self::BooleanGetter, Self::Bare];

    pub fn method_name(self, property: &str) -> String {
        match self {
            Self::Getter => format!("get_{property}"),
            Self::BooleanGetter => format!("is_{property}"),
            Self::Bare => String::from(property),
        }
    }

    pub fn accepts(self, method: &MethodInfo) -> bool {
        if method.receiver() != Receiver::Ref || method.param().is_some() || !method.is_reader() {
            return false;
        }
        match (self, method.return_type()) {
            (Self::BooleanGetter, Some(ty)) => ty.is::<bool>(),
            (_, ty) => ty.is_some(),
        }
    }
}

// -----------------------------------------------------------------------------
// WriteConvention

/// Accessor shapes tried, in order, to write property `name`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteConvention {
    /// `fn set_name(&mut self, value: T)`
    Setter,
    /// `fn set_name(&mut self, value: T) -> &mut Self`
    FluentSetter,
    /// `fn name(&mut self, value: T)`
    Builder,
    /// `fn name(&mut self, value: T) -> &mut Self`
    FluentBuilder,
}

impl WriteConvention {
    pub const ORDER: [Self; 4] = [
        Self::Setter,
        Self::FluentSetter,
        Self::Builder,
        Self::FluentBuilder,
    ];

    pub fn method_name(self, property: &str) -> String {
        match self {
            Self::Setter | Self::FluentSetter => format!("set_{property}"),
            Self::Builder | Self::FluentBuilder => String::from(property),
        }
    }

    #[inline]
    pub const fn is_fluent(self) -> bool {
        matches!(self, Self::FluentSetter | Self::FluentBuilder)
    }

    /// `expected` restricts the parameter type. Without it any single
    /// parameter is accepted.
    pub fn accepts(self, method: &MethodInfo, expected: Option<TypeId>) -> bool {
        if method.receiver() != Receiver::Mut || !method.is_writer() {
            return false;
        }
        let returns = match method.returns() {
            Returns::Unit => !self.is_fluent(),
            Returns::SelfRef => self.is_fluent(),
            Returns::Value(_) => false,
        };
        returns
            && match expected {
                Some(type_id) => method.param_is(type_id),
                None => method.param().is_some(),
            }
    }
}

// -----------------------------------------------------------------------------
// Resolution

/// Finds the read accessor of property `name`.
///
/// The first convention with a matching method wins. A missing accessor is
/// not an error.
///
/// ```
/// use cm_bean::{Bean, TypedBean, bean_methods};
/// use cm_bean::property::resolve_read;
///
/// #[derive(Bean, Default)]
/// #[bean(default)]
/// struct Flag {
///     on: bool,
/// }
///
/// #[bean_methods]
/// impl Flag {
///     fn is_on(&self) -> bool { self.on }
///     fn on(&self) -> bool { self.on }
/// }
///
/// let methods = Flag::type_bean_info().methods();
/// assert_eq!(resolve_read(methods, "on").map(|m| m.name()), Some("is_on"));
/// ```
pub fn resolve_read<'t>(table: &'t MethodTable, name: &str) -> Option<&'t MethodInfo> {
    ReadConvention::ORDER.into_iter().find_map(|convention| {
        let method_name = convention.method_name(name);
        table
            .named(&method_name)
            .find(|method| convention.accepts(method))
    })
}

/// Finds the write accessor of property `name`, optionally restricted to a
/// parameter type.
pub fn resolve_write<'t>(
    table: &'t MethodTable,
    name: &str,
    expected: Option<TypeId>,
) -> Option<&'t MethodInfo> {
    WriteConvention::ORDER.into_iter().find_map(|convention| {
        let method_name = convention.method_name(name);
        table
            .named(&method_name)
            .find(|method| convention.accepts(method, expected))
    })
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use core::any::TypeId;

    use super::{ReadConvention, WriteConvention, resolve_read, resolve_write};
    use crate::info::{Invoker, MethodInfo, MethodTable, Receiver, Returns, TypeDesc};
    use crate::{InvokeError, PropertyValue, Value};

    fn read(this: &dyn Value) -> Result<PropertyValue<'_>, InvokeError> {
        Ok(PropertyValue::Borrowed(this))
    }

    fn write(_: &mut dyn Value, _: Box<dyn Value>) -> Result<(), InvokeError> {
        Ok(())
    }

    fn getter(name: &'static str, ty: fn() -> TypeDesc) -> MethodInfo {
        MethodInfo::new(name, Receiver::Ref, None, Returns::Value(ty), Invoker::Read(read))
    }

    fn setter(name: &'static str, ty: fn() -> TypeDesc, returns: Returns) -> MethodInfo {
        MethodInfo::new(name, Receiver::Mut, Some(ty), returns, Invoker::Write(write))
    }

    #[test]
    fn boolean_getter_needs_bool() {
        let table: MethodTable = [getter("is_count", TypeDesc::of::<i32>)].into_iter().collect();
        assert!(resolve_read(&table, "count").is_none());

        let method = getter("is_ready", TypeDesc::of::<bool>);
        assert!(ReadConvention::BooleanGetter.accepts(&method));
    }

    #[test]
    fn read_prefers_get() {
        let table: MethodTable = [
            getter("size", TypeDesc::of::<u32>),
            getter("get_size", TypeDesc::of::<u32>),
        ]
        .into_iter()
        .collect();
        assert_eq!(resolve_read(&table, "size").map(MethodInfo::name), Some("get_size"));
    }

    #[test]
    fn write_order_and_expected_type() {
        let table: MethodTable = [
            setter("name", TypeDesc::of::<alloc::string::String>, Returns::Unit),
            setter("set_name", TypeDesc::of::<i64>, Returns::SelfRef),
        ]
        .into_iter()
        .collect();

        let any = resolve_write(&table, "name", None).map(MethodInfo::returns);
        assert!(matches!(any, Some(Returns::SelfRef)));

        let typed = resolve_write(&table, "name", Some(TypeId::of::<alloc::string::String>()));
        assert!(matches!(typed.map(MethodInfo::returns), Some(Returns::Unit)));

        assert!(resolve_write(&table, "name", Some(TypeId::of::<u8>())).is_none());
    }

    #[test]
    fn fluent_setter_rejected_as_plain() {
        let method = setter("set_x", TypeDesc::of::<i32>, Returns::SelfRef);
        assert!(!WriteConvention::Setter.accepts(&method, None));
        assert!(WriteConvention::FluentSetter.accepts(&method, None));
    }
}
