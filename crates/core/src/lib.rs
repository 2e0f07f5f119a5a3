//! Core types for tox2travis
//!
//! This crate holds everything between reading a `tox.ini` and handing a list of
//! populated interpreter buckets to an emitter:
//!
//! - [`interpreter`]: the built-in catalog of tox basepythons and their Travis versions
//! - [`environment`]: environment records produced by a configuration source
//! - [`binder`]: grouping of environments under interpreters, with fallback handling
//! - [`tox`]: the `tox.ini` reader used as the environment source
//!
//! # Example
//!
//! ```
//! use tox2travis_core::{bind, EnvironmentRecord, InterpreterRegistry};
//!
//! let registry = InterpreterRegistry::builtin();
//! let environments = vec![
//!     EnvironmentRecord::new("flake8", "python"),
//!     EnvironmentRecord::new("py36", "python3.6"),
//! ];
//!
//! let bound = bind(registry.interpreters(), &environments, Some("python3.6"))?;
//! let py36 = bound.iter().find(|i| i.source() == "python3.6").unwrap();
//! assert_eq!(py36.environments().len(), 2);
//! # Ok::<(), tox2travis_core::Error>(())
//! ```

pub mod binder;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod tox;

pub use binder::bind;
pub use environment::EnvironmentRecord;
pub use error::{Error, Result};
pub use interpreter::{Interpreter, InterpreterOverride, InterpreterRegistry};
