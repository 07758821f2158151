//! Language support: the code allow-list and locale identifier parsing.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the language codes clients may send
//! - `locale`: Structured locale identifiers parsed from registry values
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{LanguageRegistry, LocaleId};
//!
//! let locale = LanguageRegistry::get().resolve("en-US").expect("supported");
//! let parsed = LocaleId::parse(locale)?;
//! ```

mod locale;
mod registry;

pub use locale::{LocaleError, LocaleId};
pub use registry::{LanguageEntry, LanguageRegistry};
