pub mod chemical;
pub mod shared;
