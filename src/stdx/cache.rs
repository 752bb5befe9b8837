use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct Cache<T>(Arc<RwLock<Store<T>>>);

#[derive(Debug, Clone, Default)]
pub enum Store<T> {
    #[default]
    Empty,
    Value(T),
}

impl<T> Store<T> {
    #[inline]
    pub fn or_default(self) -> T
    where
        T: Default,
    {
        match self {
            Self::Empty => T::default(),
            Self::Value(value) => value,
        }
    }
}

impl<T> Cache<T> {
    #[inline]
    pub fn empty() -> Self {
        Self(Arc::new(RwLock::new(Store::Empty)))
    }

    #[inline]
    pub fn insert(&self, item: T) {
        *self.0.write() = Store::Value(item);
    }

    #[inline]
    pub fn get(&self) -> Store<T>
    where
        T: Clone,
    {
        self.0.read().clone()
    }
}
