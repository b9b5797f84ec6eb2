//! Typed configuration binding.
//!
//! A record describes its own layout by implementing [`FromSection`] (fields
//! read from one section) or [`FromDocument`] (globals plus nested records
//! read from named sections). Leaf values are converted with [`FromStr`].
//!
//! ```
//! use libmini::{parse_str, BindError, Document, FromDocument, FromSection, Section};
//!
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! impl FromSection for Server {
//!     fn from_section(section: &Section) -> Result<Self, BindError> {
//!         Ok(Server {
//!             host: section.value_or("host", "localhost".to_string())?,
//!             port: section.require("port")?,
//!         })
//!     }
//! }
//!
//! struct App {
//!     name: String,
//!     server: Server,
//! }
//!
//! impl FromDocument for App {
//!     fn from_document(doc: &Document) -> Result<Self, BindError> {
//!         Ok(App {
//!             name: doc.globals().require("name")?,
//!             server: doc.bind_section("server")?,
//!         })
//!     }
//! }
//!
//! let doc = parse_str("name = demo\n[server]\nPort = 8080\n").unwrap();
//! let app: App = doc.bind().unwrap();
//! assert_eq!(app.name, "demo");
//! assert_eq!(app.server.host, "localhost");
//! assert_eq!(app.server.port, 8080);
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::document::{Document, Section};

/// Error type for binding a document onto a typed record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// A required section is absent.
    #[error("Missing section [{0}]")]
    MissingSection(String),

    /// A required key is absent.
    #[error("Missing key \"{key}\" in {section}")]
    MissingKey { section: Place, key: String },

    /// A value could not be converted to the field type.
    #[error("Invalid value {value:?} for \"{key}\" in {section}: {message}")]
    InvalidValue {
        section: Place,
        key: String,
        value: String,
        message: String,
    },
}

/// Which section an error refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place(String);

impl Place {
    fn of(section: &Section) -> Self {
        Place(section.name().to_string())
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The globals section is the only one a reader cannot name.
        if self.0.is_empty() {
            write!(f, "globals")
        } else {
            write!(f, "[{}]", self.0)
        }
    }
}

/// A record populated from the keys of a single section.
pub trait FromSection: Sized {
    fn from_section(section: &Section) -> Result<Self, BindError>;
}

/// A record populated from a whole document.
pub trait FromDocument: Sized {
    fn from_document(doc: &Document) -> Result<Self, BindError>;
}

impl Section {
    /// Convert the value under `key`, if present.
    pub fn value<T>(&self, key: &str) -> Result<Option<T>, BindError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        raw.parse::<T>()
            .map(Some)
            .map_err(|e| BindError::InvalidValue {
                section: Place::of(self),
                key: key.to_lowercase(),
                value: raw.to_string(),
                message: e.to_string(),
            })
    }

    /// Convert the value under `key`, falling back to `default` when absent.
    pub fn value_or<T>(&self, key: &str, default: T) -> Result<T, BindError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        Ok(self.value(key)?.unwrap_or(default))
    }

    /// Convert the value under `key`, which must be present.
    pub fn require<T>(&self, key: &str) -> Result<T, BindError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.value(key)?.ok_or_else(|| BindError::MissingKey {
            section: Place::of(self),
            key: key.to_lowercase(),
        })
    }
}

impl Document {
    /// Look up a named section that must be present.
    pub fn require_section(&self, name: &str) -> Result<&Section, BindError> {
        self.section(name)
            .ok_or_else(|| BindError::MissingSection(name.to_string()))
    }

    /// Populate a record from the whole document.
    pub fn bind<T: FromDocument>(&self) -> Result<T, BindError> {
        T::from_document(self)
    }

    /// Populate a nested record from a named section that must be present.
    pub fn bind_section<T: FromSection>(&self, name: &str) -> Result<T, BindError> {
        T::from_section(self.require_section(name)?)
    }

    /// Populate a nested record from a named section, if present.
    pub fn bind_optional_section<T: FromSection>(&self, name: &str) -> Result<Option<T>, BindError> {
        self.section(name).map(T::from_section).transpose()
    }
}
