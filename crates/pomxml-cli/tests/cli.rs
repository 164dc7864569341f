use assert_cmd::Command;
use predicates::prelude::*;

const POM: &str = r#"<project>
  <artifactId>demo</artifactId>
  <build>
    <plugins>
      <plugin>
        <groupId>org.apache.maven.plugins</groupId>
        <artifactId>maven-compiler-plugin</artifactId>
        <version>3.11.0</version>
        <configuration><release>17</release><parameters>true</parameters></configuration>
      </plugin>
    </plugins>
  </build>
  <properties>
    <zeta>last</zeta>
    <alpha>first</alpha>
  </properties>
</project>"#;

#[test]
fn test_rewrite_from_stdin() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("pomxml")?
        .write_stdin(POM)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<project>\n\t<artifactId>demo</artifactId>",
        ));
    Ok(())
}

#[test]
fn test_properties_in_document_order() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("pomxml")?
        .arg("--properties")
        .write_stdin(POM)
        .assert()
        .success()
        .stdout("zeta=last\nalpha=first\n");
    Ok(())
}

#[test]
fn test_plugins_listing() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("pomxml")?
        .arg("--plugins")
        .write_stdin(POM)
        .assert()
        .success()
        .stdout(
            "org.apache.maven.plugins:maven-compiler-plugin:3.11.0\n  <release>17</release>\n  <parameters>true</parameters>\n",
        );
    Ok(())
}

#[test]
fn test_output_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("pom.xml");
    let output = dir.path().join("out.xml");
    std::fs::write(&input, POM)?;

    Command::cargo_bin("pomxml")?
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let written = std::fs::read_to_string(&output)?;
    assert!(written.contains("<configuration><release>17</release>\n<parameters>true</parameters></configuration>"));
    Ok(())
}

#[test]
fn test_malformed_input_fails() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("pomxml")?
        .write_stdin("<project><artifactId>x</project>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse <stdin>"));
    Ok(())
}
