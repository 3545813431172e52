pub mod list;
pub mod provider;
pub mod resource;
pub mod signal;
pub mod update_request;
pub mod verification_event;
pub mod vocabulary;
