use crate::codec::pom_group;

pom_group! {
    /// Default versions and scopes for dependencies of inheriting projects
    pub struct DependencyManagement {
        pub dependencies: Vec<Dependency> = "dependencies" > "dependency",
    }
}

pom_group! {
    pub struct Dependency {
        pub group_id: String = "groupId",
        pub artifact_id: String = "artifactId",
        pub version: String = "version",
        pub kind: String = "type",
        pub classifier: String = "classifier",
        pub scope: String = "scope",
        pub system_path: String = "systemPath",
        pub exclusions: Vec<Exclusion> = "exclusions" > "exclusion",
        /// Kept as text; property references such as `${opt}` are valid here
        pub optional: String = "optional",
    }
}

pom_group! {
    pub struct Exclusion {
        pub artifact_id: String = "artifactId",
        pub group_id: String = "groupId",
    }
}
