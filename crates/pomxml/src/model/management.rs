//! Source control, issue tracking, CI and distribution settings

use crate::codec::pom_group;
use crate::model::Repository;
use crate::tree::Configuration;

pom_group! {
    pub struct Scm {
        pub connection: String = "connection",
        pub developer_connection: String = "developerConnection",
        pub tag: String = "tag",
        pub url: String = "url",
    }
}

pom_group! {
    pub struct IssueManagement {
        pub system: String = "system",
        pub url: String = "url",
    }
}

pom_group! {
    pub struct CiManagement {
        pub system: String = "system",
        pub url: String = "url",
        pub notifiers: Vec<Notifier> = "notifiers" > "notifier",
    }
}

pom_group! {
    /// How CI build results are reported
    pub struct Notifier {
        pub kind: String = "type",
        pub send_on_error: bool = "sendOnError",
        pub send_on_failure: bool = "sendOnFailure",
        pub send_on_success: bool = "sendOnSuccess",
        pub send_on_warning: bool = "sendOnWarning",
        pub address: String = "address",
        /// Notifier specific settings
        pub configuration: Option<Configuration> = "configuration",
    }
}

pom_group! {
    /// Where artifacts and the site are deployed
    pub struct DistributionManagement {
        pub repository: Option<Repository> = "repository",
        pub snapshot_repository: Option<Repository> = "snapshotRepository",
        pub site: Option<Site> = "site",
        pub download_url: String = "downloadUrl",
        pub relocation: Option<Relocation> = "relocation",
        pub status: String = "status",
    }
}

pom_group! {
    pub struct Site {
        pub id: String = "id",
        pub name: String = "name",
        pub url: String = "url",
    }
}

pom_group! {
    /// New coordinates of a moved artifact
    pub struct Relocation {
        pub group_id: String = "groupId",
        pub artifact_id: String = "artifactId",
        pub version: String = "version",
        pub message: String = "message",
    }
}
