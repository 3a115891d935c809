pub mod encode;
pub mod explain;
