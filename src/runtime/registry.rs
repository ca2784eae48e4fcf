//! # Capability registry - runtime-owned lookup for collaborator bindings.
//!
//! The hosting runtime binds its collaborators here (the fault handler, the
//! logger, anything embedder-specific) and the interceptor resolves them per
//! dispatch instead of holding them directly. That keeps the concrete
//! reporting behavior swappable for the life of the process.
//!
//! ## Rules
//! - Keys are capability types (`TypeId`), usually trait objects.
//! - `bind` replaces silently; the last binding wins.
//! - `resolve` clones the `Arc`; the registry keeps its own reference.
//! - Lock poisoning is recovered, not propagated: a resolution triggered by
//!   a failing thread must still see the bindings.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Type-indexed map of shared capabilities.
pub struct Registry {
    slots: RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Binds a capability under its type, replacing any previous binding.
    pub fn bind<T>(&self, capability: Arc<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let mut slots = self
            .slots
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        slots.insert(TypeId::of::<T>(), Box::new(capability));
    }

    /// Resolves the capability bound under `T`, if any.
    pub fn resolve<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let slots = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        slots
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<Arc<T>>())
            .cloned()
    }

    /// Removes the binding under `T`. Returns whether one existed.
    pub fn unbind<T>(&self) -> bool
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let mut slots = self
            .slots
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        slots.remove(&TypeId::of::<T>()).is_some()
    }

    /// Number of bound capabilities.
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct English;

    impl Greeter for English {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    struct Terse;

    impl Greeter for Terse {
        fn greet(&self) -> String {
            "hi".to_string()
        }
    }

    #[test]
    fn test_bind_and_resolve_round_trip() {
        let registry = Registry::new();
        assert!(registry.is_empty());

        let greeter: Arc<dyn Greeter> = Arc::new(English);
        registry.bind(greeter);

        let resolved = registry.resolve::<dyn Greeter>().unwrap();
        assert_eq!(resolved.greet(), "hello");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_resolve_miss_is_none() {
        let registry = Registry::new();
        assert!(registry.resolve::<dyn Greeter>().is_none());
    }

    #[test]
    fn test_last_binding_wins() {
        let registry = Registry::new();
        registry.bind::<dyn Greeter>(Arc::new(English));
        registry.bind::<dyn Greeter>(Arc::new(Terse));

        let resolved = registry.resolve::<dyn Greeter>().unwrap();
        assert_eq!(resolved.greet(), "hi");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unbind_removes_the_slot() {
        let registry = Registry::new();
        registry.bind::<dyn Greeter>(Arc::new(English));
        assert!(registry.unbind::<dyn Greeter>());
        assert!(!registry.unbind::<dyn Greeter>());
        assert!(registry.resolve::<dyn Greeter>().is_none());
    }

    #[test]
    fn test_resolution_shares_the_binding() {
        let registry = Registry::new();
        let greeter: Arc<dyn Greeter> = Arc::new(English);
        registry.bind(Arc::clone(&greeter));

        let resolved = registry.resolve::<dyn Greeter>().unwrap();
        assert!(Arc::ptr_eq(&resolved, &greeter));
    }
}
