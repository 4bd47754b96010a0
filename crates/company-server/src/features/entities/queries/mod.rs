pub mod get;

pub use get::GetEntityError;
