pub mod in_memory;
pub mod resource;

pub use in_memory::*;
pub use resource::*;
