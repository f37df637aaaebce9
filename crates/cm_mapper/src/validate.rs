use core::fmt;

/// A failed constraint of a read value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    path: String,
    message: String,
}

impl Violation {
    /// `path` names the offending property, such as `items[2].quantity`.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn join(violations: &[Violation]) -> String {
        violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Constraints checked by [`BeanMapper::read_validated`](crate::BeanMapper::read_validated).
///
/// # Examples
///
/// ```
/// use cm_mapper::{Validate, Violation};
///
/// struct Range { min: u32, max: u32 }
///
/// impl Validate for Range {
///     fn validate(&self) -> Vec<Violation> {
///         let mut violations = Vec::new();
///         if self.min > self.max {
///             violations.push(Violation::new("min", "must not exceed max"));
///         }
///         violations
///     }
/// }
///
/// assert!(Range { min: 1, max: 2 }.validate().is_empty());
/// assert_eq!(Range { min: 3, max: 2 }.validate()[0].to_string(), "min: must not exceed max");
/// ```
pub trait Validate {
    /// All violated constraints, empty when the value is valid.
    fn validate(&self) -> Vec<Violation>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Vec<Violation> {
        nested_violations(self.iter().enumerate().map(|(i, item)| (format!("[{i}]"), item)))
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Vec<Violation> {
        self.as_ref().map(Validate::validate).unwrap_or_default()
    }
}

/// Validates children, prefixing their paths with the child's own.
///
/// A path starting with `[` is appended without a dot.
///
/// ```
/// use cm_mapper::{Validate, Violation, nested_violations};
///
/// struct Line(u32);
/// impl Validate for Line {
///     fn validate(&self) -> Vec<Violation> {
///         if self.0 == 0 { vec![Violation::new("quantity", "must be positive")] } else { Vec::new() }
///     }
/// }
///
/// let lines = vec![Line(1), Line(0)];
/// let found = nested_violations([("lines", &lines)]);
/// assert_eq!(found[0].path(), "lines[1].quantity");
/// ```
pub fn nested_violations<'a, P, V>(children: impl IntoIterator<Item = (P, &'a V)>) -> Vec<Violation>
where
    P: AsRef<str>,
    V: Validate + ?Sized + 'a,
{
    let mut out = Vec::new();
    for (prefix, child) in children {
        let prefix = prefix.as_ref();
        for violation in child.validate() {
            let path = if violation.path.is_empty() {
                prefix.to_owned()
            } else if violation.path.starts_with('[') {
                format!("{prefix}{}", violation.path)
            } else {
                format!("{prefix}.{}", violation.path)
            };
            out.push(Violation { path, ..violation });
        }
    }
    out
}
