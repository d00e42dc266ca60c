pub mod slug;
pub mod symbols;
