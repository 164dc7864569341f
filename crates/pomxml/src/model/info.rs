//! Descriptive project information: parent, organization, people, licenses

use crate::codec::pom_group;
use crate::properties::OrderedProperties;

pom_group! {
    /// Coordinates of the parent project
    pub struct Parent {
        pub group_id: String = "groupId",
        pub artifact_id: String = "artifactId",
        pub version: String = "version",
        pub relative_path: String = "relativePath",
    }
}

pom_group! {
    pub struct Organization {
        pub name: String = "name",
        pub url: String = "url",
    }
}

pom_group! {
    pub struct License {
        pub name: String = "name",
        pub url: String = "url",
        /// `repo` or `manual`
        pub distribution: String = "distribution",
        pub comments: String = "comments",
    }
}

pom_group! {
    /// A committer on the project
    pub struct Developer {
        pub id: String = "id",
        pub name: String = "name",
        pub email: String = "email",
        pub url: String = "url",
        pub organization: String = "organization",
        pub organization_url: String = "organizationUrl",
        pub roles: Vec<String> = "roles" > "role",
        pub timezone: String = "timezone",
        pub properties: Option<OrderedProperties> = "properties",
    }
}

pom_group! {
    /// A non-committer who contributed to the project
    pub struct Contributor {
        pub name: String = "name",
        pub email: String = "email",
        pub url: String = "url",
        pub organization: String = "organization",
        pub organization_url: String = "organizationUrl",
        pub roles: Vec<String> = "roles" > "role",
        pub timezone: String = "timezone",
        pub properties: Option<OrderedProperties> = "properties",
    }
}

pom_group! {
    pub struct MailingList {
        pub name: String = "name",
        pub subscribe: String = "subscribe",
        pub unsubscribe: String = "unsubscribe",
        pub post: String = "post",
        pub archive: String = "archive",
        pub other_archives: Vec<String> = "otherArchives" > "otherArchive",
    }
}

pom_group! {
    pub struct Prerequisites {
        /// Minimum build tool version
        pub maven: String = "maven",
    }
}
