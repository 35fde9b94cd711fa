pub mod height;
pub mod validate;
