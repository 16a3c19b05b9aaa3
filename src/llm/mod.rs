pub mod cache;
pub mod client;
pub mod completion;
pub mod types;

pub use cache::*;
pub use client::*;
pub use completion::*;
pub use types::*;
