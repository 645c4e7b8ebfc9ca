/*
 * lib.rs
 * Copyright (c) 2025 Databricks Education Team
 */

//! Build-file variables for bdc templates.
//!
//! A build file declares variables at three levels:
//!
//! - top-level `variables`, visible everywhere
//! - `notebook_defaults.variables`, shared by every notebook
//! - each notebook's own `variables`
//!
//! [`BuildVariables`] loads those sections and turns them into layered
//! [`bdc_template::Environment`]s, where built-ins computed by the build
//! always take precedence over anything the file declares.
//!
//! # Example
//!
//! ```
//! use bdc_config::BuildVariables;
//! use indexmap::IndexMap;
//!
//! let build = BuildVariables::from_yaml_str(
//!     "variables:\n  course: spark\nnotebooks:\n  - src: 01-Intro.py\n    dest: $course/$basename.py\n",
//! )?;
//! let dest = build.expand_destination(&IndexMap::new(), &build.notebooks[0])?;
//! assert_eq!(dest, "spark/01-Intro.py");
//! # Ok::<(), bdc_config::ConfigError>(())
//! ```

mod convert;
mod environment;
mod types;

pub use convert::{bool_value, is_valid_variable_name, variable_flag};
pub use types::{BuildVariables, ConfigError, ConfigResult, Notebook, NotebookDefaults};
