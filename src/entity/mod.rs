pub mod body;
pub mod colonist;
pub mod tasks;
