pub mod create;
pub mod delete;

pub use create::CreateEntityError;
pub use delete::{DeleteEntityError, DeleteEntityResponse};
