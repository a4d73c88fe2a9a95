//! Opaque key identities for context entries.
//!
//! A [`Key`] wraps any hashable value behind a type-erased handle. Two keys
//! address the same entry iff they hold the same concrete type and compare
//! equal under that type's `Eq`. Type-identity keys ([`Key::of_type`]) compare
//! by [`TypeId`] alone, so each Rust type owns exactly one slot.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Object-safe view of a hashable key.
trait KeyObject: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn eq_key(&self, other: &dyn KeyObject) -> bool;
    fn hash_key(&self, state: &mut dyn Hasher);
    fn fmt_key(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<K> KeyObject for K
where
    K: Eq + Hash + fmt::Debug + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_key(&self, other: &dyn KeyObject) -> bool {
        other
            .as_any()
            .downcast_ref::<K>()
            .is_some_and(|other| self == other)
    }

    fn hash_key(&self, mut state: &mut dyn Hasher) {
        // `1_i32` and `1_i64` must not collide.
        TypeId::of::<K>().hash(&mut state);
        self.hash(&mut state);
    }

    fn fmt_key(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The key under which a type stores "its own" value.
#[derive(Clone, Copy)]
struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type {}", self.name)
    }
}

/// A type-erased, cheaply clonable key identity.
///
/// String keys are normalized to `String`, so `"actor"` and
/// `String::from("actor")` address the same entry.
///
/// # Example
///
/// ```rust
/// use intake_context::Key;
///
/// assert_eq!(Key::from("actor"), Key::new(String::from("actor")));
/// assert_ne!(Key::new(1_i32), Key::new(1_i64));
/// assert_eq!(Key::of_type::<String>(), Key::of_type::<String>());
/// ```
#[derive(Clone)]
pub struct Key(Arc<dyn KeyObject>);

impl Key {
    /// Wraps an arbitrary hashable value as a key.
    ///
    /// Passing an existing [`Key`] returns it unchanged instead of nesting it.
    /// A `&'static str` is stored as a `String`.
    pub fn new<K>(key: K) -> Self
    where
        K: Eq + Hash + fmt::Debug + Send + Sync + 'static,
    {
        let any: &dyn Any = &key;
        if let Some(existing) = any.downcast_ref::<Self>() {
            return existing.clone();
        }
        if let Some(text) = any.downcast_ref::<&'static str>() {
            return Self(Arc::new((*text).to_owned()));
        }
        Self(Arc::new(key))
    }

    /// The type-identity key for `T`.
    pub fn of_type<T: Any + ?Sized>() -> Self {
        Self(Arc::new(TypeKey {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }))
    }

    /// Whether this key is a type-identity key.
    pub fn is_type_key(&self) -> bool {
        self.type_key().is_some()
    }

    /// The [`TypeId`] named by a type-identity key.
    pub fn type_id_key(&self) -> Option<TypeId> {
        self.type_key().map(|key| key.id)
    }

    /// The Rust type name named by a type-identity key.
    pub fn type_name(&self) -> Option<&'static str> {
        self.type_key().map(|key| key.name)
    }

    /// Borrows the wrapped key if it is a `K`.
    ///
    /// String keys are stored as `String`.
    pub fn downcast_ref<K: Any>(&self) -> Option<&K> {
        self.0.as_any().downcast_ref::<K>()
    }

    fn type_key(&self) -> Option<&TypeKey> {
        self.0.as_any().downcast_ref::<TypeKey>()
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_key(&*other.0)
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash_key(state);
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_key(f)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_key(f)
    }
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        Self(Arc::new(key.to_owned()))
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Self(Arc::new(key))
    }
}

impl From<&String> for Key {
    fn from(key: &String) -> Self {
        Self(Arc::new(key.clone()))
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(key: &Key) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct Session;

    #[test]
    fn string_forms_normalize_to_one_key() {
        let borrowed = Key::from("actor");
        let owned = Key::from(String::from("actor"));
        let generic = Key::new("actor");

        assert_eq!(borrowed, owned);
        assert_eq!(borrowed, generic);
        assert_eq!(hash_of(&borrowed), hash_of(&owned));
        assert_eq!(generic.downcast_ref::<String>().map(String::as_str), Some("actor"));
    }

    #[test]
    fn same_value_different_types_are_distinct() {
        assert_ne!(Key::new(1_i32), Key::new(1_i64));
        assert_ne!(Key::new(1_u8), Key::from("1"));
    }

    #[test]
    fn type_keys_compare_by_type_identity() {
        let first = Key::of_type::<Session>();
        let second = Key::of_type::<Session>();

        assert_eq!(first, second);
        assert_eq!(hash_of(&first), hash_of(&second));
        assert_ne!(first, Key::of_type::<String>());
        assert!(first.is_type_key());
        assert_eq!(first.type_id_key(), Some(TypeId::of::<Session>()));
    }

    #[test]
    fn type_key_never_equals_value_key() {
        assert_ne!(Key::of_type::<Session>(), Key::new(Session));
        assert!(!Key::new(Session).is_type_key());
        assert_eq!(Key::new(Session).type_name(), None);
    }

    #[test]
    fn wrapping_a_key_does_not_nest() {
        let key = Key::from("actor");
        assert_eq!(Key::new(key.clone()), key);
        assert_eq!(Key::from(&key), key);
    }

    #[test]
    fn unit_key_is_a_valid_identity() {
        assert_eq!(Key::new(()), Key::new(()));
        assert_eq!(format!("{}", Key::new(())), "()");
    }

    #[test]
    fn display_renders_wrapped_key() {
        assert_eq!(Key::from("actor").to_string(), "\"actor\"");
        assert_eq!(Key::new(42_u32).to_string(), "42");
        assert_eq!(
            Key::of_type::<String>().to_string(),
            format!("type {}", type_name::<String>())
        );
    }

    proptest! {
        #[test]
        fn equal_strings_make_equal_keys(s in "[a-z]{0,16}") {
            let left = Key::from(s.as_str());
            let right = Key::new(s.clone());
            prop_assert_eq!(hash_of(&left), hash_of(&right));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn integer_keys_match_their_equality(a in any::<i64>(), b in any::<i64>()) {
            prop_assert_eq!(Key::new(a) == Key::new(b), a == b);
        }
    }
}
