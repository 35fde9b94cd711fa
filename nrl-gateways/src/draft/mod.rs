mod in_memory;
mod json_file;

pub use self::{in_memory::*, json_file::*};
