//! Build profiles and their activation rules

use crate::codec::pom_group;
use crate::model::{
    BuildBase, Dependency, DependencyManagement, DistributionManagement, PluginRepository,
    Reporting, Repository,
};
use crate::properties::OrderedProperties;

pom_group! {
    /// Settings applied when the profile is active
    pub struct Profile {
        pub id: String = "id",
        pub activation: Option<Activation> = "activation",
        pub build: Option<BuildBase> = "build",
        pub modules: Vec<String> = "modules" > "module",
        pub distribution_management: Option<DistributionManagement> = "distributionManagement",
        pub properties: Option<OrderedProperties> = "properties",
        pub dependency_management: Option<DependencyManagement> = "dependencyManagement",
        pub dependencies: Vec<Dependency> = "dependencies" > "dependency",
        pub repositories: Vec<Repository> = "repositories" > "repository",
        pub plugin_repositories: Vec<PluginRepository> = "pluginRepositories" > "pluginRepository",
        pub reporting: Option<Reporting> = "reporting",
    }
}

pom_group! {
    pub struct Activation {
        pub active_by_default: bool = "activeByDefault",
        pub jdk: String = "jdk",
        pub os: Option<ActivationOs> = "os",
        pub property: Option<ActivationProperty> = "property",
        pub file: Option<ActivationFile> = "file",
    }
}

pom_group! {
    pub struct ActivationOs {
        pub name: String = "name",
        pub family: String = "family",
        pub arch: String = "arch",
        pub version: String = "version",
    }
}

pom_group! {
    pub struct ActivationProperty {
        pub name: String = "name",
        pub value: String = "value",
    }
}

pom_group! {
    pub struct ActivationFile {
        pub missing: String = "missing",
        pub exists: String = "exists",
    }
}
