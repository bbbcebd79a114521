pub mod copy;
pub mod link;
