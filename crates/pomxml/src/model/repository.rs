use crate::codec::pom_group;

pom_group! {
    /// A remote repository for dependencies or deployment
    pub struct Repository {
        pub unique_version: bool = "uniqueVersion",
        pub releases: Option<RepositoryPolicy> = "releases",
        pub snapshots: Option<RepositoryPolicy> = "snapshots",
        pub id: String = "id",
        pub name: String = "name",
        pub url: String = "url",
        pub layout: String = "layout",
    }
}

pom_group! {
    pub struct RepositoryPolicy {
        pub enabled: String = "enabled",
        pub update_policy: String = "updatePolicy",
        pub checksum_policy: String = "checksumPolicy",
    }
}

pom_group! {
    /// A remote repository for build plugins
    pub struct PluginRepository {
        pub releases: Option<RepositoryPolicy> = "releases",
        pub snapshots: Option<RepositoryPolicy> = "snapshots",
        pub id: String = "id",
        pub name: String = "name",
        pub url: String = "url",
        pub layout: String = "layout",
    }
}
