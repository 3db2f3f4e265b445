use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use doc_outline_config::{
    Config, ConfigError, ConfigSourceKind, LoadOptions, OutputFormat, CONFIG_FILE_NAME,
};
use tempfile::TempDir;

fn write_file(path: impl AsRef<Path>, contents: &str) {
    let mut file = fs::File::create(path).expect("create config");
    file.write_all(contents.as_bytes()).expect("write config");
}

fn canonical(path: impl AsRef<Path>) -> PathBuf {
    fs::canonicalize(path).expect("canonicalize path")
}

#[test]
fn loads_defaults_when_no_files_present() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());

    let config = Config::load(LoadOptions::default().with_working_dir(working_dir.clone()))
        .expect("load defaults");

    assert_eq!(config.page.title, "Documentation");
    assert_eq!(config.page.author, None);
    assert_eq!(config.render.format, OutputFormat::Plain);
    assert_eq!(config.render.indent, 2);
    assert_eq!(config.render.code_label, "Code Snippet");
    assert!(!config.render.timestamp);
    assert_eq!(config.sources.working_directory, working_dir);
    assert_eq!(config.sources.layers.len(), 1);
    assert_eq!(config.sources.layers[0].kind, ConfigSourceKind::Default);
}

#[test]
fn local_config_overrides_git_root() {
    let temp = TempDir::new().expect("tempdir");
    let root = canonical(temp.path());
    fs::create_dir(root.join(".git")).expect("create .git");
    let docs = root.join("docs");
    fs::create_dir(&docs).expect("create docs");

    write_file(
        root.join(CONFIG_FILE_NAME),
        r#"
        [page]
        title = "Handbook"
        author = "Platform Team"

        [render]
        format = "markdown"
        "#,
    );
    write_file(
        docs.join(CONFIG_FILE_NAME),
        r#"
        [render]
        format = "html"
        "#,
    );

    let config =
        Config::load(LoadOptions::default().with_working_dir(&docs)).expect("load layered config");

    assert_eq!(config.page.title, "Handbook");
    assert_eq!(config.page.author.as_deref(), Some("Platform Team"));
    assert_eq!(config.render.format, OutputFormat::Html);

    let kinds: Vec<ConfigSourceKind> = config
        .sources
        .layers
        .iter()
        .map(|layer| layer.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            ConfigSourceKind::Default,
            ConfigSourceKind::GitRoot,
            ConfigSourceKind::Local
        ]
    );
}

#[test]
fn override_path_wins_over_local() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());

    write_file(
        working_dir.join(CONFIG_FILE_NAME),
        "[render]\nindent = 4\ntimestamp = true\n",
    );
    write_file(working_dir.join("ci.toml"), "[render]\nindent = 6\n");

    let config = Config::load(
        LoadOptions::default()
            .with_working_dir(&working_dir)
            .with_override_path("ci.toml"),
    )
    .expect("load with override");

    assert_eq!(config.render.indent, 6);
    assert!(config.render.timestamp);
    assert_eq!(
        config.sources.layers.last().map(|layer| layer.kind),
        Some(ConfigSourceKind::Override)
    );
}

#[test]
fn missing_override_is_reported() {
    let temp = TempDir::new().expect("tempdir");

    let err = Config::load(
        LoadOptions::default()
            .with_working_dir(temp.path())
            .with_override_path("absent.toml"),
    )
    .expect_err("missing override should fail");

    assert!(matches!(err, ConfigError::OverrideNotFound { .. }));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let temp = TempDir::new().expect("tempdir");
    write_file(temp.path().join(CONFIG_FILE_NAME), "[render\nformat = ");

    let err = Config::load(LoadOptions::default().with_working_dir(temp.path()))
        .expect_err("parse failure");

    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn invalid_values_are_validation_errors() {
    let temp = TempDir::new().expect("tempdir");
    write_file(
        temp.path().join(CONFIG_FILE_NAME),
        "[render]\nformat = \"pdf\"\n",
    );

    let err = Config::load(LoadOptions::default().with_working_dir(temp.path()))
        .expect_err("validation failure");

    match err {
        ConfigError::Validation(errors) => {
            assert_eq!(errors.iter().count(), 1);
            assert!(errors.to_string().contains("unknown format 'pdf'"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
