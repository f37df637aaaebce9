use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use std::sync::OnceLock;

use log::debug;

use crate::info::{FieldInfo, MethodTable, TypeDesc, short_type_name};
use crate::{Bean, BeanError, PropertyDescriptor, Value};

// -----------------------------------------------------------------------------
// BeanInfo

/// Metadata of a bean type.
///
/// Built once per type by the generated [`TypedBean`](crate::TypedBean) impl.
/// The method table and the property table are resolved on first use.
///
/// # Examples
///
/// ```
/// use cm_bean::{Bean, TypedBean, bean_methods};
///
/// #[derive(Bean, Default)]
/// #[bean(default)]
/// struct Point {
///     x: i32,
///     y: i32,
///     #[bean(skip)]
///     cache: Option<i64>,
/// }
///
/// #[bean_methods]
/// impl Point {
///     fn get_x(&self) -> i32 { self.x }
///     fn set_x(&mut self, x: i32) { self.x = x; }
///     fn y(&self) -> i32 { self.y }
/// }
///
/// let info = Point::type_bean_info();
/// assert_eq!(info.name(), "Point");
/// assert_eq!(info.fields().len(), 3);
///
/// let names: Vec<_> = info.properties().iter().map(|p| p.name()).collect();
/// assert_eq!(names, ["x", "y"]);
/// assert!(info.property("y").is_some_and(|p| !p.is_writable()));
/// ```
pub struct BeanInfo {
    ty: TypeDesc,
    name: String,
    fields: Box<[FieldInfo]>,
    constructor: Option<fn() -> Box<dyn Value>>,
    methods: OnceLock<MethodTable>,
    properties: OnceLock<Box<[PropertyDescriptor]>>,
}

impl BeanInfo {
    pub fn new<T: Bean>(fields: Vec<FieldInfo>) -> Self {
        let ty = TypeDesc::of::<T>();
        Self {
            name: short_type_name(ty.path()),
            ty,
            fields: fields.into_boxed_slice(),
            constructor: None,
            methods: OnceLock::new(),
            properties: OnceLock::new(),
        }
    }

    /// Sets the no-arg constructor used by instantiation and cloning.
    #[inline]
    pub fn with_constructor(mut self, constructor: fn() -> Box<dyn Value>) -> Self {
        self.constructor = Some(constructor);
        self
    }

    #[inline]
    pub fn ty(&self) -> &TypeDesc {
        &self.ty
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    /// The type name without module path.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name() == name)
    }

    #[inline]
    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// Creates a fresh instance through the no-arg constructor.
    pub fn instantiate(&self) -> Result<Box<dyn Value>, BeanError> {
        match self.constructor {
            Some(constructor) => Ok(constructor()),
            None => Err(BeanError::Instantiate {
                type_path: self.type_path(),
            }),
        }
    }

    /// Registered methods of this type.
    pub fn methods(&self) -> &MethodTable {
        self.methods.get_or_init(|| MethodTable::collect(self.ty.id()))
    }

    /// Enumerated properties, in field declaration order.
    ///
    /// Candidates are the private, non-skipped fields. A candidate is kept
    /// when a read or write accessor resolves for it. Types without a no-arg
    /// constructor have no enumerable properties.
    pub fn properties(&'static self) -> &'static [PropertyDescriptor] {
        self.properties.get_or_init(|| self.enumerate())
    }

    /// An enumerated property by name.
    pub fn property(&'static self, name: &str) -> Option<&'static PropertyDescriptor> {
        self.properties().iter().find(|p| p.name() == name)
    }

    /// An enumerated property, or an ad-hoc descriptor resolving accessors
    /// for `name` regardless of fields.
    pub fn descriptor(&'static self, name: &str) -> Cow<'static, PropertyDescriptor> {
        match self.property(name) {
            Some(property) => Cow::Borrowed(property),
            None => Cow::Owned(PropertyDescriptor::new(self, String::from(name))),
        }
    }

    fn enumerate(&'static self) -> Box<[PropertyDescriptor]> {
        if self.constructor.is_none() {
            debug!("`{}` has no no-arg constructor, no properties enumerated", self.type_path());
            return Box::new([]);
        }

        let properties: Box<[PropertyDescriptor]> = self
            .fields
            .iter()
            .filter(|field| field.is_private() && !field.is_skipped())
            .map(|field| PropertyDescriptor::new(self, field.name()))
            .filter(|property| {
                let keep = property.is_readable() || property.is_writable();
                crate::cfg::debug! {
                    if !keep {
                        debug!("`{}.{}` has no accessor", self.name, property.name());
                    }
                }
                keep
            })
            .collect();

        debug!("`{}`: {} properties", self.type_path(), properties.len());
        properties
    }
}

impl core::fmt::Debug for BeanInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BeanInfo")
            .field("ty", &self.ty)
            .field("fields", &self.fields)
            .field("constructor", &self.constructor.is_some())
            .finish_non_exhaustive()
    }
}
