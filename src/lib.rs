#[macro_use(debug, info, trace)]
extern crate tracing;

pub mod config;
pub mod description;
pub mod dfa;
pub mod error;
pub mod kernel;
pub mod nfa;
pub mod pipeline;
pub mod report;
pub mod symbol;

pub mod c_interface;
#[cfg(feature = "python")]
pub mod python_interface;

pub use error::Error;
