pub mod draft;
pub mod service;
pub mod template;
