pub mod copy;
pub mod list;
pub mod select;
pub mod variants;
