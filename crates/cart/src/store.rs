//! Cart storage.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::Owner;
use tokio::sync::RwLock;

use crate::cart::Cart;

/// Mapping from owner to cart.
///
/// Implementations must be thread-safe. A store provides no read-modify-write
/// atomicity on its own; callers that need it hold the owner's lock from
/// [`OwnerLocks`](crate::OwnerLocks) across the sequence.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Returns the owner's cart, if one has been stored.
    async fn get(&self, owner: &Owner) -> Option<Cart>;

    /// Returns the owner's cart, or a fresh empty cart that is not stored
    /// until it is written back with [`put`](CartStore::put).
    async fn get_or_create(&self, owner: &Owner) -> Cart {
        self.get(owner).await.unwrap_or_default()
    }

    /// Replaces the owner's cart. Last write wins.
    async fn put(&self, owner: &Owner, cart: Cart);
}

/// Process-lifetime, in-memory cart store.
#[derive(Clone, Default)]
pub struct InMemoryCartStore {
    carts: Arc<RwLock<HashMap<Owner, Cart>>>,
}

impl InMemoryCartStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored carts.
    pub async fn cart_count(&self) -> usize {
        self.carts.read().await.len()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn get(&self, owner: &Owner) -> Option<Cart> {
        self.carts.read().await.get(owner).cloned()
    }

    async fn put(&self, owner: &Owner, cart: Cart) {
        self.carts.write().await.insert(owner.clone(), cart);
    }
}
