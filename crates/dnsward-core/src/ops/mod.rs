pub mod draft;
pub mod field_ops;
pub mod group_ops;

pub use draft::Draft;
