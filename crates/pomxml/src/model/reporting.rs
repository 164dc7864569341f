use crate::codec::pom_group;

pom_group! {
    /// Site report generation
    pub struct Reporting {
        pub exclude_defaults: String = "excludeDefaults",
        pub output_directory: String = "outputDirectory",
        pub plugins: Vec<ReportingPlugin> = "plugins" > "plugin",
    }
}

pom_group! {
    pub struct ReportingPlugin {
        pub group_id: String = "groupId",
        pub artifact_id: String = "artifactId",
        pub version: String = "version",
        pub inherited: String = "inherited",
        pub report_sets: Vec<ReportSet> = "reportSets" > "reportSet",
    }
}

pom_group! {
    pub struct ReportSet {
        pub id: String = "id",
        pub reports: Vec<String> = "reports" > "report",
        pub inherited: String = "inherited",
    }
}
