//! Type-erased values stored in a context.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A reference-counted, type-erased context value.
///
/// Reading a value back always goes through a checked downcast; a `Value`
/// never hands out a reference of the wrong type.
///
/// # Example
///
/// ```rust
/// use intake_context::Value;
///
/// let value = Value::new(3_u32);
/// assert_eq!(value.downcast_ref::<u32>(), Some(&3));
/// assert_eq!(value.downcast_ref::<i64>(), None);
/// ```
#[derive(Clone)]
pub struct Value {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Value {
    /// Erases `value`.
    ///
    /// Passing an existing [`Value`] returns it unchanged instead of nesting it.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        let type_name = type_name::<T>();
        let boxed: Box<dyn Any + Send + Sync> = Box::new(value);
        match boxed.downcast::<Self>() {
            Ok(existing) => *existing,
            Err(boxed) => Self {
                inner: Arc::from(boxed),
                type_name,
            },
        }
    }

    /// The Rust type name of the stored value.
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The [`TypeId`] of the stored value.
    pub fn value_type_id(&self) -> TypeId {
        Any::type_id(&*self.inner)
    }

    /// Whether the stored value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Borrows the stored value as a `T`, if that is what it is.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Converts into a shared `T`, returning `self` unchanged on mismatch.
    pub fn downcast<T: Any + Send + Sync>(self) -> Result<Arc<T>, Self> {
        let type_name = self.type_name;
        self.inner
            .downcast::<T>()
            .map_err(|inner| Self { inner, type_name })
    }

    /// Whether the stored value is a `T` equal to `other`.
    pub fn equals<T: PartialEq + Any>(&self, other: &T) -> bool {
        self.downcast_ref::<T>().is_some_and(|value| value == other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Value").field(&self.type_name).finish()
    }
}
