#![allow(deprecated)]

use std::str::FromStr;

use pomxml::legacy::{self, LegacyValue};
use pomxml::Project;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const POM: &str = r#"<project>
  <build>
    <plugins>
      <plugin>
        <artifactId>maven-shade-plugin</artifactId>
        <configuration>
          <createDependencyReducedPom>false</createDependencyReducedPom>
          <transformers>
            <transformer implementation="Foo">
              <resource>META-INF/spring.handlers</resource>
            </transformer>
          </transformers>
        </configuration>
      </plugin>
    </plugins>
  </build>
</project>"#;

#[test]
fn test_legacy_entries_from_project_configuration() -> TestResult {
    let project = Project::from_str(POM)?;
    let configuration = project
        .build_plugins()
        .next()
        .and_then(|plugin| plugin.configuration.as_ref())
        .ok_or("no configuration")?;

    let entries = configuration.legacy_entries();
    assert_eq!(
        entries.get("createDependencyReducedPom"),
        Some(&LegacyValue::Text("false".to_string()))
    );
    let resource = entries
        .get("transformers")
        .and_then(LegacyValue::as_nested)
        .and_then(|map| map.get("transformer"))
        .and_then(LegacyValue::as_nested)
        .and_then(|map| map.get("resource"))
        .and_then(LegacyValue::as_text);
    assert_eq!(resource, Some("META-INF/spring.handlers"));
    Ok(())
}

#[test]
fn test_tree_stays_authoritative() -> TestResult {
    let project = Project::from_str(POM)?;
    let configuration = project
        .build_plugins()
        .next()
        .and_then(|plugin| plugin.configuration.clone())
        .ok_or("no configuration")?;
    let before = configuration.clone();
    let _ = legacy::flatten(&configuration);
    assert_eq!(configuration, before);
    Ok(())
}

#[test]
fn test_fallback_to_raw_text() {
    assert_eq!(
        legacy::entry_value("\n  <open>never closed\n"),
        LegacyValue::Text("<open>never closed".to_string())
    );
}
