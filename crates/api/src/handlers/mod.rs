pub mod list;
pub mod provider;
pub mod public;
pub mod resource;
pub mod signal;
pub mod update_request;
pub mod vocabulary;
