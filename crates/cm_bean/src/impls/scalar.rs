use alloc::borrow::Cow;
use alloc::string::String;
use core::time::Duration;
use std::path::PathBuf;
use std::time::SystemTime;

/// Implements [`Value`](crate::Value) for leaf types.
///
/// The types must be `Clone + PartialEq + Debug + Send + Sync + 'static`.
/// Prefix the list with `display:` to also render through
/// [`Display`](core::fmt::Display) in textual projections.
///
/// # Examples
///
/// ```
/// use cm_bean::{Value, ValueKind, impl_scalar};
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Level { Low, High }
///
/// impl_scalar!(Level);
///
/// let level: &dyn Value = &Level::High;
/// assert_eq!(level.kind(), ValueKind::Scalar);
/// assert_eq!(level.value_eq(&Level::High), Some(true));
/// assert_eq!(level.value_eq(&Level::Low), Some(false));
/// ```
#[macro_export]
macro_rules! impl_scalar {
    (@value $ty:ty { $($extra:tt)* }) => {
        impl $crate::Value for $ty {
            #[inline]
            fn value_ref(&self) -> $crate::ValueRef<'_> {
                $crate::ValueRef::Scalar(self)
            }

            #[inline]
            fn value_mut(&mut self) -> $crate::ValueMut<'_> {
                $crate::ValueMut::Scalar(self)
            }

            fn clone_value(
                &self,
            ) -> ::core::result::Result<::std::boxed::Box<dyn $crate::Value>, $crate::BeanError> {
                ::core::result::Result::Ok(::std::boxed::Box::new(::core::clone::Clone::clone(self)))
            }

            fn value_eq(&self, other: &dyn $crate::Value) -> ::core::option::Option<bool> {
                ::core::option::Option::Some(
                    other
                        .downcast_ref::<Self>()
                        .is_some_and(|other| ::core::cmp::PartialEq::eq(self, other)),
                )
            }

            fn value_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }

            $($extra)*
        }
    };
    (display: $($ty:ty),+ $(,)?) => {
        $(
            $crate::impl_scalar!(@value $ty {
                fn value_display(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    ::core::fmt::Display::fmt(self, f)
                }
            });
        )+
    };
    ($($ty:ty),+ $(,)?) => {
        $( $crate::impl_scalar!(@value $ty {}); )+
    };
}

impl_scalar!(display:
    bool, char,
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64,
    String, &'static str, Cow<'static, str>,
);

impl_scalar!((), Duration, PathBuf, SystemTime);

#[cfg(test)]
mod tests {
    use alloc::borrow::Cow;
    use alloc::string::String;
    use core::time::Duration;

    use crate::{Value, ValueKind};

    #[test]
    fn scalar_equality_is_typed() {
        let a: &dyn Value = &5_u32;
        assert_eq!(a.value_eq(&5_u32), Some(true));
        assert_eq!(a.value_eq(&6_u32), Some(false));
        assert_eq!(a.value_eq(&5_u64), Some(false));
    }

    #[test]
    fn clone_keeps_type() {
        let text = Cow::<'static, str>::Borrowed("abc");
        let cloned = (&text as &dyn Value).clone_value().unwrap();
        assert_eq!(cloned.take::<Cow<'static, str>>().unwrap(), "abc");
    }

    #[test]
    fn rendering() {
        let d: &dyn Value = &Duration::from_millis(1500);
        assert_eq!(d.kind(), ValueKind::Scalar);
        assert_eq!(format!("{d:?}"), "1.5s");

        let s = String::from("a b");
        let s: &dyn Value = &s;
        assert_eq!(format!("{}", s.display()), "a b");
        assert_eq!(format!("{}", (&2.5_f64 as &dyn Value).display()), "2.5");
    }
}
