pub mod backlog;
pub mod batch;
pub mod product;
