#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs, missing_debug_implementations)]
extern crate alloc;
mod builder;
mod error;
mod hook;
mod host;
mod hosted;
mod identity;
mod pool;
mod produce;

pub use builder::*;
pub use error::*;
pub use hook::Hook;
pub use host::*;
pub use hosted::*;
pub use identity::*;
pub use pool::*;
pub use produce::*;
