pub mod config;
pub mod convert;
pub mod filesystem;
pub mod naming;
pub mod runtime;
pub mod sidebar;
