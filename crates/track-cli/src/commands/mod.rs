pub mod encode;
pub mod send;
