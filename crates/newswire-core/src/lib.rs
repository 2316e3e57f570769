pub mod collections;
pub mod model;

pub use collections::{CATEGORIES, NEWS, USERS};
pub use model::{Category, NewsArticle, User};
