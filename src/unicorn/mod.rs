pub mod furniture;
