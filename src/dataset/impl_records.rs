use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// A single observation, addressed by field name
///
/// Fitted models only need to look up the value of the fields they were trained on. A missing
/// field is reported as `None`, which models treat the same way as an unseen value.
pub trait Record {
    fn value(&self, field: &str) -> Option<&str>;
}

/// Implement records for hash maps from field name to value
impl<K, V, S> Record for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn value(&self, field: &str) -> Option<&str> {
        self.get(field).map(AsRef::as_ref)
    }
}

/// Implement records for ordered maps from field name to value
impl<K, V> Record for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn value(&self, field: &str) -> Option<&str> {
        self.get(field).map(AsRef::as_ref)
    }
}

/// Implement records for references
impl<R: Record + ?Sized> Record for &R {
    fn value(&self, field: &str) -> Option<&str> {
        (**self).value(field)
    }
}
