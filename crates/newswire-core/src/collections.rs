//! Names of the three collections the API operates on.

/// Category records, keyed by a numeric `categoryId`.
pub const CATEGORIES: &str = "categories";

/// News articles. The primary id is assigned by the store.
pub const NEWS: &str = "news";

/// User records, keyed by a caller-supplied `userId`.
pub const USERS: &str = "users";
