pub mod chemical;
