//! Typed project model.
//!
//! Every group of the project descriptor maps to a struct whose fields name
//! their elements. Plugin configuration stays schema-less as a
//! [`Configuration`] tree and properties keep their document order.

pub mod build;
pub mod dependency;
pub mod info;
pub mod management;
pub mod profile;
pub mod reporting;
pub mod repository;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, instrument};

pub use build::{
    Build, BuildBase, Extension, Plugin, PluginExecution, PluginManagement, Resource,
};
pub use dependency::{Dependency, DependencyManagement, Exclusion};
pub use info::{Contributor, Developer, License, MailingList, Organization, Parent, Prerequisites};
pub use management::{
    CiManagement, DistributionManagement, IssueManagement, Notifier, Relocation, Scm, Site,
};
pub use profile::{Activation, ActivationFile, ActivationOs, ActivationProperty, Profile};
pub use reporting::{ReportSet, Reporting, ReportingPlugin};
pub use repository::{PluginRepository, Repository, RepositoryPolicy};

use crate::codec::{pom_group, XmlValue};
use crate::error::{Error, ErrorKind, Result, Span};
use crate::input::Input;
use crate::properties::OrderedProperties;
use crate::tree::Configuration;
use crate::xml::{Config, Event, Reader, Writer};

/// Name of the document element
pub const ROOT_ELEMENT: &str = "project";

pom_group! {
    /// A whole project descriptor.
    ///
    /// Attributes on the `<project>` element, such as namespace declarations
    /// and `xsi:schemaLocation`, are kept and written back unchanged.
    pub struct Project [attributes] {
        pub model_version: String = "modelVersion",
        pub parent: Option<Parent> = "parent",
        pub group_id: String = "groupId",
        pub artifact_id: String = "artifactId",
        pub version: String = "version",
        pub packaging: String = "packaging",
        pub name: String = "name",
        pub description: String = "description",
        pub url: String = "url",
        pub inception_year: String = "inceptionYear",
        pub organization: Option<Organization> = "organization",
        pub licenses: Vec<License> = "licenses" > "license",
        pub developers: Vec<Developer> = "developers" > "developer",
        pub contributors: Vec<Contributor> = "contributors" > "contributor",
        pub mailing_lists: Vec<MailingList> = "mailingLists" > "mailingList",
        pub prerequisites: Option<Prerequisites> = "prerequisites",
        pub modules: Vec<String> = "modules" > "module",
        pub scm: Option<Scm> = "scm",
        pub issue_management: Option<IssueManagement> = "issueManagement",
        pub ci_management: Option<CiManagement> = "ciManagement",
        pub distribution_management: Option<DistributionManagement> = "distributionManagement",
        pub dependency_management: Option<DependencyManagement> = "dependencyManagement",
        pub dependencies: Vec<Dependency> = "dependencies" > "dependency",
        pub repositories: Vec<Repository> = "repositories" > "repository",
        pub plugin_repositories: Vec<PluginRepository> = "pluginRepositories" > "pluginRepository",
        pub build: Option<Build> = "build",
        pub reporting: Option<Reporting> = "reporting",
        pub profiles: Vec<Profile> = "profiles" > "profile",
        pub properties: Option<OrderedProperties> = "properties",
    }
}

impl Project {
    /// Parse a project document with custom reader limits
    pub fn from_str_with_config(input: &str, config: Config) -> Result<Self> {
        Self::from_input(Input::from_str(input), config)
    }

    /// Parse a project document from raw bytes
    pub fn from_bytes(input: &[u8]) -> Result<Self> {
        Self::from_input(Input::from_bytes(input), Config::default())
    }

    /// Parse a project document from `input`.
    ///
    /// The prolog (declaration, comments, doctype) is skipped. The document
    /// element must be `<project>`; anything after it must still be
    /// well-formed but is otherwise ignored.
    pub fn from_input(input: Input<'_>, config: Config) -> Result<Self> {
        let mut reader = Reader::with_config(input.as_bytes(), config);
        loop {
            match reader.next_event()? {
                Some(Event::Start(tag)) => {
                    if tag.name.local != ROOT_ELEMENT {
                        return Err(Error::at(
                            ErrorKind::UnexpectedElement {
                                expected: ROOT_ELEMENT.to_string(),
                                found: tag.name.qualified(),
                            },
                            reader.position(),
                        ));
                    }
                    let project = <Self as XmlValue>::decode(&mut reader, &tag)?;
                    expect_epilog(&mut reader)?;
                    debug!(
                        filename = input.filename(),
                        dependencies = project.dependencies.len(),
                        "parsed project"
                    );
                    return Ok(project);
                }
                Some(_) => {}
                None => {
                    return Err(Error::with_message(
                        ErrorKind::UnexpectedEof,
                        Span::at(reader.position()),
                        "document has no root element",
                    ))
                }
            }
        }
    }

    /// Serialize as a full document: the XML declaration, then the project
    /// element with one tab of indentation per nesting level.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::indented("\t");
        writer.declaration();
        XmlValue::encode(self, ROOT_ELEMENT, &mut writer)?;
        let mut out = writer.finish()?;
        out.push('\n');
        Ok(out)
    }

    /// Serialize with [`Project::to_xml_string`] and write to `path`
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let xml = self.to_xml_string()?;
        fs::write(path, xml).map_err(|err| Error::io(path, &err))?;
        debug!("wrote project file");
        Ok(())
    }

    /// Every plugin in the build section, including plugin management
    pub fn build_plugins(&self) -> impl Iterator<Item = &Plugin> + '_ {
        self.build.iter().flat_map(|build| {
            build.base.plugins.iter().chain(
                build
                    .base
                    .plugin_management
                    .iter()
                    .flat_map(|management| management.plugins.iter()),
            )
        })
    }
}

/// Only comments, processing instructions and whitespace may follow the
/// document element
fn expect_epilog(reader: &mut Reader<'_>) -> Result<()> {
    while let Some(event) = reader.next_event()? {
        let trailing = match event {
            Event::Start(tag) => format!("<{}>", tag.name.qualified()),
            Event::Text(text) if !text.trim().is_empty() => text,
            _ => continue,
        };
        return Err(Error::with_message(
            ErrorKind::InvalidToken,
            Span::at(reader.position()),
            format!("content after the document element: {trailing}"),
        ));
    }
    Ok(())
}

impl FromStr for Project {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_input(Input::from_str(s), Config::default())
    }
}

/// Read and parse the project file at `path`
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn parse_file(path: impl AsRef<Path>) -> Result<Project> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| Error::io(path, &err))?;
    let name = path.to_string_lossy();
    Project::from_input(
        Input::from_bytes(&bytes).with_filename(&name),
        Config::default(),
    )
}

/// Decode a single `<configuration>` element, keeping its attributes
pub fn configuration_from_str(input: &str) -> Result<Configuration> {
    let mut reader = Reader::from_str(input);
    loop {
        match reader.next_event()? {
            Some(Event::Start(tag)) => return <Configuration as XmlValue>::decode(&mut reader, &tag),
            Some(_) => {}
            None => {
                return Err(Error::with_message(
                    ErrorKind::UnexpectedEof,
                    Span::at(reader.position()),
                    "no configuration element",
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- leading comment -->
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>org.example</groupId>
  <artifactId>demo</artifactId>
  <version>1.0.0</version>
</project>
"#;

    #[test]
    fn test_parse_minimal() -> Result<()> {
        let project = Project::from_str(MINIMAL)?;
        assert_eq!(project.model_version, "4.0.0");
        assert_eq!(project.group_id, "org.example");
        assert_eq!(project.artifact_id, "demo");
        assert_eq!(project.attributes.len(), 1);
        assert!(project.build.is_none());
        Ok(())
    }

    #[test]
    fn test_wrong_root_rejected() {
        let err = Project::from_str("<settings><a/></settings>").err();
        assert!(matches!(
            err.as_ref().map(Error::kind),
            Some(ErrorKind::UnexpectedElement { .. })
        ));
    }

    #[test]
    fn test_empty_document_rejected() {
        let err = Project::from_str("<!-- nothing -->").err();
        assert!(matches!(
            err.as_ref().map(Error::kind),
            Some(ErrorKind::UnexpectedEof)
        ));
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        assert!(Project::from_str("<project></project></extra>").is_err());
    }

    #[test]
    fn test_second_document_element_rejected() {
        for input in [
            "<project><artifactId>a</artifactId></project><project><artifactId>b</artifactId></project>",
            "<project/><other/>",
            "<project/>\ntext",
        ] {
            let err = Project::from_str(input).err();
            assert!(
                err.as_ref().is_some_and(Error::is_malformed_stream),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn test_epilog_comments_allowed() -> Result<()> {
        let project = Project::from_str("<project><artifactId>a</artifactId></project>\n<!-- end -->\n")?;
        assert_eq!(project.artifact_id, "a");
        Ok(())
    }

    #[test]
    fn test_to_xml_string_layout() -> Result<()> {
        let project = Project {
            model_version: "4.0.0".to_string(),
            modules: vec!["core".to_string()],
            ..Project::default()
        };
        assert_eq!(
            project.to_xml_string()?,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<project>\n\t<modelVersion>4.0.0</modelVersion>\n\t<modules>\n\t\t<module>core</module>\n\t</modules>\n</project>\n"
        );
        Ok(())
    }

    #[test]
    fn test_build_plugins_include_management() -> Result<()> {
        let project = Project::from_str(
            "<project><build><plugins><plugin><artifactId>a</artifactId></plugin></plugins>\
             <pluginManagement><plugins><plugin><artifactId>b</artifactId></plugin></plugins></pluginManagement></build></project>",
        )?;
        let ids = project
            .build_plugins()
            .map(|plugin| plugin.artifact_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "b"]);
        Ok(())
    }

    #[test]
    fn test_configuration_from_str() -> Result<()> {
        let tree = configuration_from_str(
            r#"<configuration combine.children="append"><source>17</source></configuration>"#,
        )?;
        assert_eq!(tree.attributes.len(), 1);
        assert_eq!(tree.to_fragment()?, "<source>17</source>");
        Ok(())
    }
}
