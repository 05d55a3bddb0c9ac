//! Input binding: request query strings and bodies are checked against typed
//! declarations before any handler logic runs.
pub mod body;
pub mod query;

pub use body::{
    BoundFields, BoundValue, CreateArticleFields, FieldSet, FieldSpec, UpdateArticleFields,
    bind_body,
};
pub use query::bind_list_query;
