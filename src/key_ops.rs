//! KeyOps: the hash function and equality function a table is instantiated with.
//!
//! Every `Table<K, V, O>` fixes `O: KeyOps<K>` in its type, so both functions
//! are resolved at compile time and inlined into the probe loop. A correct
//! implementation must satisfy `eq(a, b) ⇒ hash(a) == hash(b)`; the table
//! relies on this (it compares cached hashes before calling `eq`) but does not
//! verify it.

use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

/// Hash and equality for keys of type `K`.
///
/// `K` may be unsized so that one implementation serves both an owned key
/// and its borrowed form (`String` and `str`, `Vec<u8>` and `[u8]`).
pub trait KeyOps<K: ?Sized> {
    fn hash(&self, key: &K) -> u64;
    fn eq(&self, a: &K, b: &K) -> bool;
}

/// Key ops for any `K: Hash + Eq`, hashed through a `BuildHasher`.
#[derive(Clone, Debug, Default)]
pub struct HasherOps<S = DefaultHashBuilder> {
    build: S,
}

impl<S> HasherOps<S> {
    pub fn with_hasher(build: S) -> Self {
        Self { build }
    }
}

impl<K, S> KeyOps<K> for HasherOps<S>
where
    K: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        self.build.hash_one(key)
    }

    #[inline]
    fn eq(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

/// Bernstein's xor variant for byte strings: `h = 5381; h = h * 33 ^ byte`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Djb2;

impl Djb2 {
    #[inline]
    pub fn hash_bytes(bytes: &[u8]) -> u64 {
        bytes.iter().fold(5381u64, |h, &b| {
            (h << 5).wrapping_add(h) ^ u64::from(b)
        })
    }
}

impl<K> KeyOps<K> for Djb2
where
    K: ?Sized + AsRef<[u8]>,
{
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        Djb2::hash_bytes(key.as_ref())
    }

    #[inline]
    fn eq(&self, a: &K, b: &K) -> bool {
        a.as_ref() == b.as_ref()
    }
}

/// The key's own integer value is its hash. Suited to small dense key spaces
/// such as bytes, where `hash % capacity` spreads perfectly.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

macro_rules! identity_ops {
    ($($t:ty),* $(,)?) => {
        $(
            impl KeyOps<$t> for Identity {
                #[inline]
                fn hash(&self, key: &$t) -> u64 {
                    *key as u64
                }

                #[inline]
                fn eq(&self, a: &$t, b: &$t) -> bool {
                    a == b
                }
            }
        )*
    };
}

identity_ops!(u8, u16, u32, u64, usize, char);

/// Key ops built from a pair of closures or function items.
#[derive(Clone, Copy, Debug)]
pub struct FnOps<H, E> {
    hash: H,
    eq: E,
}

impl<H, E> FnOps<H, E> {
    pub fn new(hash: H, eq: E) -> Self {
        Self { hash, eq }
    }
}

impl<K, H, E> KeyOps<K> for FnOps<H, E>
where
    K: ?Sized,
    H: Fn(&K) -> u64,
    E: Fn(&K, &K) -> bool,
{
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        (self.hash)(key)
    }

    #[inline]
    fn eq(&self, a: &K, b: &K) -> bool {
        (self.eq)(a, b)
    }
}
