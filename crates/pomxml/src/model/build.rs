//! Build settings and plugins

use crate::codec::pom_group;
use crate::model::Dependency;
use crate::tree::Configuration;

pom_group! {
    /// Build settings shared by the project build and profile builds
    pub struct BuildBase {
        pub default_goal: String = "defaultGoal",
        pub resources: Vec<Resource> = "resources" > "resource",
        pub test_resources: Vec<Resource> = "testResources" > "testResource",
        pub directory: String = "directory",
        pub final_name: String = "finalName",
        pub filters: Vec<String> = "filters" > "filter",
        pub plugin_management: Option<PluginManagement> = "pluginManagement",
        pub plugins: Vec<Plugin> = "plugins" > "plugin",
    }
}

pom_group! {
    /// Project build: source layout and extensions, plus the shared
    /// [`BuildBase`] settings written inside the same element
    pub struct Build {
        pub source_directory: String = "sourceDirectory",
        pub script_source_directory: String = "scriptSourceDirectory",
        pub test_source_directory: String = "testSourceDirectory",
        pub output_directory: String = "outputDirectory",
        pub test_output_directory: String = "testOutputDirectory",
        pub extensions: Vec<Extension> = "extensions" > "extension",
        ..pub base: BuildBase
    }
}

pom_group! {
    pub struct Extension {
        pub group_id: String = "groupId",
        pub artifact_id: String = "artifactId",
        pub version: String = "version",
    }
}

pom_group! {
    pub struct Resource {
        pub target_path: String = "targetPath",
        pub filtering: String = "filtering",
        pub directory: String = "directory",
        pub includes: Vec<String> = "includes" > "include",
        pub excludes: Vec<String> = "excludes" > "exclude",
    }
}

pom_group! {
    pub struct PluginManagement {
        pub plugins: Vec<Plugin> = "plugins" > "plugin",
    }
}

pom_group! {
    /// A build plugin with its executions and free-form configuration
    pub struct Plugin {
        pub group_id: String = "groupId",
        pub artifact_id: String = "artifactId",
        pub version: String = "version",
        pub extensions: String = "extensions",
        pub executions: Vec<PluginExecution> = "executions" > "execution",
        pub dependencies: Vec<Dependency> = "dependencies" > "dependency",
        pub inherited: String = "inherited",
        pub configuration: Option<Configuration> = "configuration",
    }
}

pom_group! {
    pub struct PluginExecution {
        pub id: String = "id",
        pub phase: String = "phase",
        pub goals: Vec<String> = "goals" > "goal",
        pub inherited: String = "inherited",
        pub configuration: Option<Configuration> = "configuration",
    }
}

impl Plugin {
    /// `groupId:artifactId:version`, leaving out empty parts
    pub fn coordinates(&self) -> String {
        [&self.group_id, &self.artifact_id, &self.version]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(":")
    }
}
