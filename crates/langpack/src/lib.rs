//! `langpack` - build and install language extension packs
//!
//! This library implements the workflow for translating a game whose text
//! lives in three-column CSV language tables: extract a mapping file for the
//! translator, merge the edited mapping back into the table, check the result
//! and install it as a `#GF_<name>.csv` pack in the game's language folder.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod mapping;
pub mod pack;
mod records;
pub mod table;
pub mod workflow;

pub use check::{check_pack, CheckReport};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use mapping::Mapping;
pub use pack::{install, InstallOptions, InstallOutcome, InstallReport, PackName};
pub use records::LineEnding;
pub use table::{Entry, LanguageTable};
pub use workflow::{build_pack_file, create_mapping_file, BuildReport, CreateReport};
