use alloc::string::String;
use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};

// -----------------------------------------------------------------------------
// TypeDesc

/// The identity and path of a type.
///
/// Two descriptors are equal when their [`TypeId`]s are.
#[derive(Clone, Copy)]
pub struct TypeDesc {
    id: TypeId,
    path: &'static str,
}

impl TypeDesc {
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>(),
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Full path, as given by [`core::any::type_name`].
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// The path with module prefixes removed, e.g. `Vec<String>`.
    pub fn name(&self) -> String {
        short_type_name(self.path)
    }

    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeDesc {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDesc {}

impl Hash for TypeDesc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

// -----------------------------------------------------------------------------
// Short names

/// Strips module paths from every segment of a type path.
///
/// ```
/// use cm_bean::info::short_type_name;
///
/// assert_eq!(
///     short_type_name("alloc::vec::Vec<core::option::Option<alloc::string::String>>"),
///     "Vec<Option<String>>",
/// );
/// assert_eq!(short_type_name("(my::A, &my::B)"), "(A, &B)");
/// ```
pub fn short_type_name(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut start = 0;

    for (index, c) in path.char_indices() {
        if matches!(c, '<' | '>' | ',' | '(' | ')' | '[' | ']' | ';' | '&' | '*' | ' ') {
            out.push_str(last_segment(&path[start..index]));
            out.push(c);
            start = index + c.len_utf8();
        }
    }
    out.push_str(last_segment(&path[start..]));
    out
}

#[inline]
fn last_segment(segment: &str) -> &str {
    segment.rsplit("::").next().unwrap_or(segment)
}
