pub use crate::envref::{EnvRef, EnvWeak};
use crate::builtins;
use crate::expression::{Closure, Expression};
use crate::symbol::Symbol;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub enum Entry {
    Value(Expression),
    Closure(Closure<EnvWeak>),
}

impl Entry {
    fn to_value(&self) -> Option<Expression> {
        match self {
            Entry::Value(expr) => Some(expr.clone()),
            Entry::Closure(c) => c.upgrade().map(Expression::Closure),
        }
    }
}

/// One scope in the chain. The root scope has no parent; names it cannot
/// resolve are builtin operations or evaluate to themselves.
pub struct Environment {
    map: HashMap<Symbol, Entry>,
    parent: Option<EnvRef>,
}

impl Environment {
    pub fn new(parent: Option<EnvRef>) -> Environment {
        Environment {
            map: Default::default(),
            parent,
        }
    }

    pub fn parent(&self) -> Option<&EnvRef> {
        self.parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn lookup(&self, name: &str) -> Expression {
        if let Some(value) = self.map.get(name).and_then(Entry::to_value) {
            return value;
        }
        match &self.parent {
            Some(parent) => parent.borrow().lookup(name),
            None => builtins::lookup(name)
                .map(Expression::Builtin)
                .unwrap_or_else(|| Expression::atom(name)),
        }
    }

    pub fn is_bound_locally(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn insert_entry<K: Into<Symbol>>(&mut self, key: K, entry: Entry) {
        self.map.insert(key.into(), entry);
    }

    /// every name visible from this scope, including the builtin operations
    pub fn all_keys(&self) -> Vec<Symbol> {
        let mut keys: Vec<_> = self.map.keys().cloned().collect();
        match &self.parent {
            Some(parent) => keys.extend(parent.borrow().all_keys()),
            None => keys.extend(builtins::names().map(Symbol::from)),
        }
        keys
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Environment {{")?;
        for (i, (k, v)) in self.map.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match v {
                Entry::Value(x) => write!(f, "{}: {}", k, x.short_repr())?,
                Entry::Closure(p) => write!(f, "{}: {:?}", k, p.name())?,
            }
        }
        write!(f, "}}")
    }
}

impl EnvRef {
    pub fn lookup(&self, name: &str) -> Expression {
        self.borrow().lookup(name)
    }

    /// Bind `name` in this scope, replacing an existing local binding, and
    /// return the bound value.
    pub fn define<K: Into<Symbol>>(&self, name: K, value: Expression) -> Expression {
        let name = name.into();
        let value = match value {
            Expression::Closure(c) => Expression::Closure(c.rename(name.clone())),
            v => v,
        };

        // avoid Rc loops by storing closures that refer to the
        // environment they live in as weak references. A closure over a
        // child frame stays strong: nothing else keeps that frame alive.
        let entry = match &value {
            Expression::Closure(c) if c.env().ptr_eq(self) => Entry::Closure(c.downgrade()),
            v => Entry::Value(v.clone()),
        };

        self.borrow_mut().insert_entry(name, entry);
        value
    }

    /// Create a child scope holding `bindings`.
    pub fn extend<K, I>(&self, bindings: I) -> EnvRef
    where
        K: Into<Symbol>,
        I: IntoIterator<Item = (K, Expression)>,
    {
        let env: EnvRef = Environment::new(Some(self.clone())).into();
        for (name, value) in bindings {
            env.define(name, value);
        }
        env
    }
}

/// A fresh root environment without any library definitions.
pub fn default_env() -> EnvRef {
    Environment::new(None).into()
}
