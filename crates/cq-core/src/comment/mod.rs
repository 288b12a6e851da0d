//! Comment module
//!
//! Wraps host comment records in typed accessors and resolves which comment
//! kind represents each record.

pub mod model;
pub mod queried;
pub mod query;
pub mod registry;

pub use model::*;
pub use queried::{QueriedComment, DATE_FORMAT};
pub use query::CommentQuery;
pub use registry::{ClassTable, Constructor, TypeRegistry, ANY_TYPE};
