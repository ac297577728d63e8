pub mod disjoint_set;
pub mod names;
pub mod resolver;

pub use disjoint_set::DisjointSet;
pub use names::{CanonicalName, NameCanonicalizer};
pub use resolver::{IdentityCluster, IdentityMap, IdentityResolver};

// Module-level constants
pub const TARGET_IDENTITY: &str = "identity";
