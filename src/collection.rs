//! Ordered, name- and type-indexed container for hook events
//!
//! [`HookCollection`] keeps events in insertion order and makes every element
//! addressable two ways: by zero-based position or by a string matching the
//! element's logical name or type identity. The two addressing modes are
//! statically distinct through the tagged [`HookKey`].
//!
//! The container is deliberately narrow. Aggregate, statistical and
//! restructuring operations (averaging, flattening, chunking and friends)
//! are disabled rather than omitted: each is present as an always-failing
//! method so misuse is caught loudly instead of producing coerced nonsense.
//!
//! String matching is equality-only. Event objects have no relational order,
//! so no operator/value matching variant exists on any lookup.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use crate::{
    error::{HookError, Result},
    hook::Hook,
};

/// Key addressing one element of a [`HookCollection`].
///
/// Conversions exist from `usize`, `&str` and `String`, so keyed operations
/// accept plain indices and names directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookKey {
    /// Zero-based position in the collection.
    Index(usize),
    /// Logical name or type identity of an element.
    Name(String),
}

impl From<usize> for HookKey {
    fn from(index: usize) -> Self {
        HookKey::Index(index)
    }
}

impl From<&str> for HookKey {
    fn from(name: &str) -> Self {
        HookKey::Name(name.to_string())
    }
}

impl From<String> for HookKey {
    fn from(name: String) -> Self {
        HookKey::Name(name)
    }
}

macro_rules! unsupported_operations {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!(
                "Disabled bulk operation: `", stringify!($name),
                "` would have to coerce heterogeneous event objects.\n\n",
                "# Errors\n\n",
                "Always returns [`HookError::UnsupportedOperation`]; the ",
                "collection is never touched."
            )]
            pub fn $name(&self) -> Result<Infallible> {
                Err(HookError::UnsupportedOperation(stringify!($name)))
            }
        )*
    };
}

/// Ordered collection restricted to hook events.
///
/// String-keyed operations scan for elements whose `name()` or `kind()`
/// equals the key, in insertion order. Lookups hand out `Arc` clones of the
/// stored events, so a found event shares its payload cell with the
/// collection's copy.
#[derive(Clone, Default)]
pub struct HookCollection {
    items: Vec<Arc<dyn Hook>>,
}

impl HookCollection {
    /// Empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Collection over `items`, validating every element.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::InvalidHook`] if any item violates the hook
    /// contract. Construction fails as a whole; no item is retained.
    pub fn from_hooks<I>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = Arc<dyn Hook>>,
    {
        let mut collection = Self::new();
        for item in items {
            collection.push(item)?;
        }
        Ok(collection)
    }

    fn validate(item: &dyn Hook) -> Result<()> {
        if item.name().is_empty() {
            return Err(HookError::InvalidHook(
                "the given item does not satisfy the hook contract (empty name)".to_string(),
            ));
        }
        Ok(())
    }

    /// Append one validated event.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::InvalidHook`] if `item` violates the hook
    /// contract; the collection is unchanged in that case.
    pub fn push(&mut self, item: Arc<dyn Hook>) -> Result<()> {
        Self::validate(item.as_ref())?;
        self.items.push(item);
        Ok(())
    }

    /// Alias for [`push`](Self::push).
    pub fn add(&mut self, item: Arc<dyn Hook>) -> Result<()> {
        self.push(item)
    }

    /// Insert one validated event at position 0, shifting the rest back.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::InvalidHook`] if `item` violates the hook
    /// contract; the collection is unchanged in that case.
    pub fn prepend(&mut self, item: Arc<dyn Hook>) -> Result<()> {
        Self::validate(item.as_ref())?;
        self.items.insert(0, item);
        Ok(())
    }

    /// Whether some element's `name()` or `kind()` equals `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.items
            .iter()
            .any(|item| item.name() == key || item.kind() == key)
    }

    /// Whether some stored element carries the same `name()` as `hook`.
    ///
    /// Matching is by name, not object identity: a distinct instance with a
    /// matching name counts.
    pub fn contains_hook(&self, hook: &dyn Hook) -> bool {
        let name = hook.name();
        self.items.iter().any(|item| item.name() == name)
    }

    /// First element whose `name()` or `kind()` equals `name`, or `None`.
    pub fn find(&self, name: &str) -> Option<Arc<dyn Hook>> {
        self.items
            .iter()
            .find(|item| item.name() == name || item.kind() == name)
            .cloned()
    }

    /// As [`find`](Self::find), but failing when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::HookNotFound`] carrying `name` when no element
    /// matches.
    pub fn find_or_fail(&self, name: &str) -> Result<Arc<dyn Hook>> {
        self.find(name)
            .ok_or_else(|| HookError::HookNotFound(name.to_string()))
    }

    /// Position of the first element whose `name()` or `kind()` equals
    /// `value`, or `None` when nothing matches.
    pub fn search(&self, value: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.name() == value || item.kind() == value)
    }

    /// Whether `key` addresses an element.
    pub fn exists(&self, key: impl Into<HookKey>) -> bool {
        match key.into() {
            HookKey::Index(index) => index < self.items.len(),
            HookKey::Name(name) => self.contains(&name),
        }
    }

    /// Element addressed by `key`, leaving the collection unchanged.
    ///
    /// Returns `None` when the key resolves to nothing; chain
    /// `unwrap_or_else` for a lazily evaluated caller default.
    pub fn get(&self, key: impl Into<HookKey>) -> Option<Arc<dyn Hook>> {
        match key.into() {
            HookKey::Index(index) => self.items.get(index).cloned(),
            HookKey::Name(name) => self.find(&name),
        }
    }

    /// Remove every element addressed by `key`.
    ///
    /// An index removes exactly that position; out-of-bounds indices are
    /// ignored. A name removes all elements whose `name()` or `kind()`
    /// matches, not just the first.
    pub fn unset(&mut self, key: impl Into<HookKey>) {
        match key.into() {
            HookKey::Index(index) => {
                if index < self.items.len() {
                    self.items.remove(index);
                }
            }
            HookKey::Name(name) => {
                self.items
                    .retain(|item| item.name() != name && item.kind() != name);
            }
        }
    }

    /// Remove and return the element addressed by `key`.
    ///
    /// An index pulls positionally; a name resolves to the first match via
    /// [`search`](Self::search). Returns `None` and leaves the collection
    /// unchanged when the key resolves to nothing.
    pub fn pull(&mut self, key: impl Into<HookKey>) -> Option<Arc<dyn Hook>> {
        let index = match key.into() {
            HookKey::Index(index) => index,
            HookKey::Name(name) => self.search(&name)?,
        };
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Join the display form (`name()`) of every element with `separator`.
    ///
    /// `", "` is the conventional separator. Separators are always plain
    /// strings here, so the undefined non-scalar-separator case of the
    /// classic implode contract cannot arise.
    pub fn implode(&self, separator: &str) -> String {
        self.items
            .iter()
            .map(|item| item.name())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Number of stored events.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection holds no events.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All stored events in order.
    pub fn hooks(&self) -> &[Arc<dyn Hook>] {
        &self.items
    }

    /// Iterator over the stored events in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<dyn Hook>> {
        self.items.iter()
    }

    /// Fixed-count generation cannot produce event objects.
    ///
    /// # Errors
    ///
    /// Always returns [`HookError::UnsupportedOperation`], like the disabled
    /// operations below.
    pub fn times(_count: usize) -> Result<Infallible> {
        Err(HookError::UnsupportedOperation("times"))
    }

    // Each of these would need numeric or associative coercion of event
    // objects, so each fails fast instead of degrading.
    unsupported_operations! {
        avg,
        average,
        median,
        mode,
        collapse,
        flip,
        group_by,
        except,
        flatten,
        key_by,
        join,
        map_to_dictionary,
        map_with_keys,
        merge_recursive,
        nth,
        replace_recursive,
        splice,
        split,
        chunk,
        take,
        transform,
        zip,
        pad,
    }
}

impl<'a> IntoIterator for &'a HookCollection {
    type Item = &'a Arc<dyn Hook>;
    type IntoIter = std::slice::Iter<'a, Arc<dyn Hook>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Debug for HookCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookCollection")
            .field(
                "items",
                &self.items.iter().map(|item| item.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::hook::{NamedHook, PayloadCell};

    macro_rules! test_event {
        ($ty:ident) => {
            #[derive(Debug, Default)]
            struct $ty {
                payload: PayloadCell,
            }

            impl Hook for $ty {
                fn kind(&self) -> &'static str {
                    std::any::type_name::<Self>()
                }

                fn payload(&self) -> Value {
                    self.payload.get()
                }

                fn set_payload(&self, payload: Value) {
                    self.payload.set(payload);
                }
            }
        };
        ($ty:ident, $name:literal) => {
            #[derive(Debug, Default)]
            struct $ty {
                payload: PayloadCell,
            }

            impl Hook for $ty {
                fn kind(&self) -> &'static str {
                    std::any::type_name::<Self>()
                }

                fn name(&self) -> String {
                    $name.to_string()
                }

                fn payload(&self) -> Value {
                    self.payload.get()
                }

                fn set_payload(&self, payload: Value) {
                    self.payload.set(payload);
                }
            }
        };
    }

    test_event!(ReportReady);
    test_event!(CacheCleared, "cache_cleared");

    fn create_test_hook(name: &str) -> Arc<dyn Hook> {
        Arc::new(NamedHook::named(name, json!(null)))
    }

    fn create_sample_collection() -> HookCollection {
        HookCollection::from_hooks([
            create_test_hook("alpha"),
            create_test_hook("beta"),
            create_test_hook("gamma"),
        ])
        .unwrap()
    }

    #[test]
    fn new_collections_are_empty() {
        let collection = HookCollection::new();
        assert!(collection.is_empty());
        assert_eq!(collection.len(), 0);
        assert!(collection.find("anything").is_none());
        assert!(collection.search("anything").is_none());
    }

    #[test]
    fn construction_preserves_the_given_order() {
        let collection = create_sample_collection();

        assert_eq!(collection.len(), 3);
        assert_eq!(collection.hooks()[0].name(), "alpha");
        assert_eq!(collection.hooks()[1].name(), "beta");
        assert_eq!(collection.hooks()[2].name(), "gamma");
    }

    #[test]
    fn construction_rejects_contract_violations() {
        let result = HookCollection::from_hooks([
            create_test_hook("valid"),
            create_test_hook(""),
        ]);
        assert!(matches!(result, Err(HookError::InvalidHook(_))));

        let mut collection = HookCollection::new();
        let err = collection.push(create_test_hook("")).unwrap_err();
        assert!(matches!(err, HookError::InvalidHook(_)));
        assert!(collection.is_empty());
    }

    #[test]
    fn push_and_add_append_at_the_back() {
        let mut collection = HookCollection::new();
        collection.push(create_test_hook("first")).unwrap();
        collection.add(create_test_hook("second")).unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.implode(", "), "first, second");
    }

    #[test]
    fn prepend_inserts_at_the_front() {
        let mut collection = create_sample_collection();
        collection.prepend(create_test_hook("zeroth")).unwrap();

        assert_eq!(collection.len(), 4);
        assert_eq!(collection.hooks()[0].name(), "zeroth");
        assert_eq!(collection.hooks()[1].name(), "alpha");

        let err = collection.prepend(create_test_hook("")).unwrap_err();
        assert!(matches!(err, HookError::InvalidHook(_)));
        assert_eq!(collection.len(), 4);
    }

    #[test]
    fn contains_matches_name_and_type_identity() {
        let collection = HookCollection::from_hooks([
            Arc::new(ReportReady::default()) as Arc<dyn Hook>,
            Arc::new(CacheCleared::default()),
            create_test_hook("warmup"),
        ])
        .unwrap();

        assert!(collection.contains(std::any::type_name::<ReportReady>()));
        assert!(collection.contains("cache_cleared"));
        assert!(collection.contains(std::any::type_name::<CacheCleared>()));
        assert!(collection.contains("warmup"));
        assert!(!collection.contains("missing"));
    }

    #[test]
    fn contains_hook_matches_by_name_not_identity() {
        let collection = HookCollection::from_hooks([
            Arc::new(CacheCleared::default()) as Arc<dyn Hook>,
            create_test_hook("warmup"),
        ])
        .unwrap();

        assert!(collection.contains_hook(&CacheCleared::default()));
        assert!(collection.contains_hook(&NamedHook::named("cache_cleared", json!(null))));
        assert!(!collection.contains_hook(&NamedHook::named("other", json!(null))));
    }

    #[test]
    fn find_resolves_names_and_type_identities() {
        let collection = HookCollection::from_hooks([
            Arc::new(ReportReady::default()) as Arc<dyn Hook>,
            Arc::new(CacheCleared::default()),
        ])
        .unwrap();

        let by_kind = collection.find(std::any::type_name::<ReportReady>()).unwrap();
        assert_eq!(by_kind.kind(), std::any::type_name::<ReportReady>());

        let by_name = collection.find("cache_cleared").unwrap();
        assert_eq!(by_name.name(), "cache_cleared");

        assert!(collection.find("missing").is_none());
        assert!(HookCollection::new().find("anything").is_none());
    }

    #[test]
    fn find_or_fail_reports_the_missing_name() {
        let collection = create_sample_collection();

        assert_eq!(collection.find_or_fail("beta").unwrap().name(), "beta");

        // Not `unwrap_err`: the discarded success value is a trait object
        // with no `Debug` impl.
        let err = collection.find_or_fail("ghost").err().unwrap();
        assert_eq!(err.to_string(), "No hook found matched with name 'ghost'");
    }

    #[test]
    fn exists_covers_indices_and_names() {
        let collection = create_sample_collection();

        assert!(collection.exists(0));
        assert!(collection.exists(2));
        assert!(!collection.exists(3));
        assert!(collection.exists("beta"));
        assert!(!collection.exists("ghost"));
    }

    #[test]
    fn get_resolves_indices_and_names() {
        let collection = create_sample_collection();

        assert_eq!(collection.get(1).unwrap().name(), "beta");
        assert_eq!(collection.get("gamma").unwrap().name(), "gamma");
        assert!(collection.get(9).is_none());
        assert!(collection.get("ghost").is_none());

        // Lazily evaluated caller default for a missing key.
        let fallback = collection
            .get("ghost")
            .unwrap_or_else(|| create_test_hook("fallback"));
        assert_eq!(fallback.name(), "fallback");
    }

    #[test]
    fn search_returns_the_first_matching_position() {
        let mut collection = create_sample_collection();
        collection.push(create_test_hook("beta")).unwrap();

        assert_eq!(collection.search("alpha"), Some(0));
        assert_eq!(collection.search("beta"), Some(1));
        assert_eq!(collection.search("ghost"), None);
    }

    #[test]
    fn unset_by_name_removes_every_match() {
        let mut collection = create_sample_collection();
        collection.push(create_test_hook("beta")).unwrap();
        assert_eq!(collection.len(), 4);

        collection.unset("beta");

        assert_eq!(collection.len(), 2);
        assert!(!collection.contains("beta"));
        assert_eq!(collection.implode(", "), "alpha, gamma");
    }

    #[test]
    fn unset_by_type_identity_removes_every_match() {
        let mut collection = HookCollection::from_hooks([
            Arc::new(ReportReady::default()) as Arc<dyn Hook>,
            create_test_hook("alpha"),
            Arc::new(ReportReady::default()),
        ])
        .unwrap();

        collection.unset(std::any::type_name::<ReportReady>());

        assert_eq!(collection.len(), 1);
        assert_eq!(collection.hooks()[0].name(), "alpha");
    }

    #[test]
    fn unset_by_index_removes_one_position() {
        let mut collection = create_sample_collection();

        collection.unset(1);
        assert_eq!(collection.implode(", "), "alpha, gamma");

        // Out-of-bounds indices are ignored.
        collection.unset(9);
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn pull_removes_and_returns_the_match() {
        let mut collection = create_sample_collection();

        let pulled = collection.pull("beta").unwrap();
        assert_eq!(pulled.name(), "beta");
        assert_eq!(collection.len(), 2);
        assert!(!collection.contains("beta"));

        let pulled = collection.pull(0).unwrap();
        assert_eq!(pulled.name(), "alpha");

        assert!(collection.pull("ghost").is_none());
        assert!(collection.pull(9).is_none());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn implode_joins_display_names() {
        let collection = create_sample_collection();

        assert_eq!(collection.implode(", "), "alpha, beta, gamma");
        assert_eq!(collection.implode("|"), "alpha|beta|gamma");
        assert_eq!(HookCollection::new().implode(", "), "");
    }

    #[test]
    fn disabled_operations_fail_without_touching_the_collection() {
        let collection = create_sample_collection();
        let before = collection.implode(", ");

        let outcomes = [
            ("avg", collection.avg()),
            ("average", collection.average()),
            ("median", collection.median()),
            ("mode", collection.mode()),
            ("collapse", collection.collapse()),
            ("flip", collection.flip()),
            ("group_by", collection.group_by()),
            ("except", collection.except()),
            ("flatten", collection.flatten()),
            ("key_by", collection.key_by()),
            ("join", collection.join()),
            ("map_to_dictionary", collection.map_to_dictionary()),
            ("map_with_keys", collection.map_with_keys()),
            ("merge_recursive", collection.merge_recursive()),
            ("nth", collection.nth()),
            ("replace_recursive", collection.replace_recursive()),
            ("splice", collection.splice()),
            ("split", collection.split()),
            ("chunk", collection.chunk()),
            ("take", collection.take()),
            ("transform", collection.transform()),
            ("zip", collection.zip()),
            ("pad", collection.pad()),
            ("times", HookCollection::times(3)),
        ];

        for (name, outcome) in outcomes {
            match outcome {
                Err(HookError::UnsupportedOperation(op)) => assert_eq!(op, name),
                other => panic!("expected unsupported operation for {}, got {:?}", name, other),
            }
        }

        assert_eq!(collection.len(), 3);
        assert_eq!(collection.implode(", "), before);
    }

    #[test]
    fn hook_keys_convert_from_indices_and_names() {
        assert_eq!(HookKey::from(2usize), HookKey::Index(2));
        assert_eq!(HookKey::from("alpha"), HookKey::Name("alpha".to_string()));
        assert_eq!(
            HookKey::from("alpha".to_string()),
            HookKey::Name("alpha".to_string())
        );
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let collection = create_sample_collection();

        let names: Vec<String> = collection.iter().map(|item| item.name()).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);

        let borrowed: Vec<String> = (&collection).into_iter().map(|item| item.name()).collect();
        assert_eq!(borrowed, names);
    }
}
