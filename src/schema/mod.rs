pub mod actor;
pub mod node;
pub mod record;
