#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::{HashMap, HashSet};

    /// Insertion-ordered map used where iteration order must be stable.
    pub type IndexMap<K, V> = indexmap::IndexMap<K, V>;
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

    /// Insertion-ordered map used where iteration order must be stable.
    pub type IndexMap<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;
}
