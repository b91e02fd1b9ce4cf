pub mod add;
pub mod delete;
pub mod edit;
pub mod list;
pub mod search;
pub mod stats;
pub mod train;
