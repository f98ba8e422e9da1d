pub mod coordinator;
pub mod handle;
pub mod use_cases;

pub use coordinator::*;
pub use handle::*;
pub use use_cases::*;
