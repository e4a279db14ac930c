pub mod client;
pub mod grid;
pub mod images;
pub mod mutation;
