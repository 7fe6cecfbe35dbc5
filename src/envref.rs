pub use env_ref_impl::{EnvRef, EnvWeak};

#[cfg(feature = "thread-safe")]
mod env_ref_impl {
    use crate::environment::Environment;
    use crate::expression::{Ref, Weak};
    use std::sync::{self, RwLock};

    /// Shared handle to an environment. Defines take the write lock, so
    /// concurrent evaluations see them in a sequential order.
    #[derive(Clone)]
    pub struct EnvRef(Ref<RwLock<Environment>>);

    pub type EnvTmpRef<'a> = sync::RwLockReadGuard<'a, Environment>;
    pub type EnvMutRef<'a> = sync::RwLockWriteGuard<'a, Environment>;

    impl From<Environment> for EnvRef {
        fn from(env: Environment) -> Self {
            EnvRef(Ref::new(RwLock::new(env)))
        }
    }

    impl EnvRef {
        pub fn borrow(&self) -> EnvTmpRef<'_> {
            // a poisoned lock only means another evaluation panicked
            self.0.read().unwrap_or_else(|e| e.into_inner())
        }

        pub fn borrow_mut(&self) -> EnvMutRef<'_> {
            self.0.write().unwrap_or_else(|e| e.into_inner())
        }

        pub fn downgrade(&self) -> EnvWeak {
            EnvWeak(Ref::downgrade(&self.0))
        }

        pub fn ptr_eq(&self, other: &EnvRef) -> bool {
            Ref::ptr_eq(&self.0, &other.0)
        }
    }

    #[derive(Clone, Default)]
    pub struct EnvWeak(Weak<RwLock<Environment>>);

    impl EnvWeak {
        pub fn upgrade(&self) -> Option<EnvRef> {
            self.0.upgrade().map(EnvRef)
        }
    }
}

#[cfg(not(feature = "thread-safe"))]
mod env_ref_impl {
    use crate::environment::Environment;
    use crate::expression::{Ref, Weak};
    use std::cell::{self, RefCell};

    #[derive(Clone)]
    pub struct EnvRef(Ref<RefCell<Environment>>);

    pub type EnvTmpRef<'a> = cell::Ref<'a, Environment>;
    pub type EnvMutRef<'a> = cell::RefMut<'a, Environment>;

    impl From<Environment> for EnvRef {
        fn from(env: Environment) -> Self {
            EnvRef(Ref::new(RefCell::new(env)))
        }
    }

    impl EnvRef {
        pub fn borrow(&self) -> EnvTmpRef<'_> {
            self.0.borrow()
        }

        pub fn borrow_mut(&self) -> EnvMutRef<'_> {
            self.0.borrow_mut()
        }

        pub fn downgrade(&self) -> EnvWeak {
            EnvWeak(Ref::downgrade(&self.0))
        }

        pub fn ptr_eq(&self, other: &EnvRef) -> bool {
            Ref::ptr_eq(&self.0, &other.0)
        }
    }

    #[derive(Clone, Default)]
    pub struct EnvWeak(Weak<RefCell<Environment>>);

    impl EnvWeak {
        pub fn upgrade(&self) -> Option<EnvRef> {
            self.0.upgrade().map(EnvRef)
        }
    }
}
