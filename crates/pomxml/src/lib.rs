//! pomxml - project descriptor reader and writer
//!
//! Plugin configuration blocks are captured as schema-less node trees,
//! properties keep their document order, and the whole descriptor maps to a
//! typed [`Project`].
//!
//! # Quick Start
//!
//! ```
//! use pomxml::Project;
//! use std::str::FromStr;
//! # fn main() -> Result<(), pomxml::Error> {
//! let project = Project::from_str(
//!     r#"<project>
//!   <artifactId>demo</artifactId>
//!   <build><plugins><plugin>
//!     <artifactId>maven-compiler-plugin</artifactId>
//!     <configuration><release>17</release></configuration>
//!   </plugin></plugins></build>
//!   <properties><b>2</b><a>1</a></properties>
//! </project>"#,
//! )?;
//! let plugin = project.build_plugins().next();
//! let release = plugin
//!     .and_then(|p| p.configuration.as_ref())
//!     .and_then(|c| c.find("release").and_then(|id| c.node(id)))
//!     .map(|node| node.text.as_str());
//! assert_eq!(release, Some("17"));
//!
//! let keys: Vec<_> = project.properties.iter().flat_map(|p| p.keys()).collect();
//! assert_eq!(keys, vec!["b", "a"]);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result, Span};

pub mod input;
pub use input::Input;

mod lexer;

pub mod xml;

pub mod tree;
pub use tree::{Configuration, Node, NodeId};

pub mod properties;
pub use properties::OrderedProperties;

pub mod legacy;
pub use legacy::{LegacyMap, LegacyValue};

pub mod codec;
pub use codec::XmlValue;

pub mod model;
pub use model::{parse_file, Plugin, Project};

/// Decode a standalone configuration fragment
pub fn configuration_from_fragment(fragment: &str) -> Result<Configuration> {
    Configuration::from_fragment(fragment)
}

/// Decode a standalone properties fragment
pub fn properties_from_fragment(fragment: &str) -> Result<OrderedProperties> {
    OrderedProperties::from_fragment(fragment)
}
