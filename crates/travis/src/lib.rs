//! Travis CI matrix emitter for tox2travis
//!
//! Turns interpreters with bound tox environments into a `.travis.yml` whose
//! build matrix runs each environment on its interpreter.
//!
//! # Example
//!
//! ```
//! use tox2travis_core::{bind, EnvironmentRecord, InterpreterRegistry};
//! use tox2travis_travis::emit;
//!
//! let registry = InterpreterRegistry::builtin();
//! let environments = vec![EnvironmentRecord::new("py36", "python3.6")];
//! let bound = bind(registry.interpreters(), &environments, None)?;
//!
//! let yaml = emit(&bound)?;
//! assert!(yaml.contains("  - python: \"3.6\"\n    env: TOXENV=py36\n"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Interpreter to Travis Mapping
//!
//! | Core field | `.travis.yml` |
//! |------------|---------------|
//! | `interpreter.target` | `matrix.include[].python` |
//! | `environment.name` | `matrix.include[].env` as `TOXENV=<name>` |

pub mod emitter;
pub mod output;
pub mod schema;

pub use emitter::{EmitterError, EmitterResult, emit, footer, header, render};
pub use output::{FileStatus, write_descriptor};
pub use schema::{Matrix, MatrixEntry, TravisDescriptor, parse_descriptor};
