pub mod errors;
pub mod events;
pub mod todo;

pub use errors::*;
pub use events::*;
pub use todo::*;
