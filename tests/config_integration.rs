//! Configuration, data files and custom directives working together

use std::fs;
use std::path::PathBuf;

use domjuice::{
    Binder, BinderConfig, BindError, Data, DataError, DefineError, DirectiveRegistry,
    DirectiveSite, Document, MissingKeyPolicy, UnknownDirectivePolicy,
};
use pretty_assertions::assert_eq;
use serde_json::Value;

/// Write `content` to a uniquely named file in the system temp dir
fn temp_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("domjuice-{}-{}", std::process::id(), name));
    fs::write(&path, content).expect("Should write temp file");
    path
}

#[test]
fn test_config_file_drives_policies() {
    let path = temp_file(
        "strict.toml",
        r#"
        [binder]
        missing_key = "strict"
        unknown_directive = "reject"
        "#,
    );
    let config = BinderConfig::from_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(config.missing_key, MissingKeyPolicy::Strict);
    let binder = Binder::with_config(config);

    let err = binder.define_markup(r#"<p each:="items"></p>"#).unwrap_err();
    assert!(matches!(err, DefineError::UnsupportedDirective { .. }));

    let template = binder.define_markup(r#"<p content:="k"></p>"#).unwrap();
    assert!(matches!(
        template.instantiate(&Data::new()),
        Err(BindError::MissingBinding { .. })
    ));
}

#[test]
fn test_unknown_config_key_is_an_error() {
    assert!(BinderConfig::from_str("[binder]\nmissing = \"skip\"").is_err());
}

#[test]
fn test_data_files() {
    let json = temp_file("data.json", r#"{"title": "From JSON"}"#);
    let toml = temp_file("data.toml", "title = \"From TOML\"");
    let from_json = Data::from_file(&json).unwrap();
    let from_toml = Data::from_file(&toml).unwrap();
    fs::remove_file(&json).ok();
    fs::remove_file(&toml).ok();

    let template = Binder::new()
        .define_markup(r#"<h1 content:="title"></h1>"#)
        .unwrap();
    assert_eq!(
        template.instantiate(&from_json).unwrap().to_html(),
        "<h1>From JSON</h1>"
    );
    assert_eq!(
        template.instantiate(&from_toml).unwrap().to_html(),
        "<h1>From TOML</h1>"
    );
}

#[test]
fn test_malformed_data_file() {
    let path = temp_file("broken.json", "{ not json");
    let err = Data::from_file(&path).unwrap_err();
    fs::remove_file(&path).ok();
    assert!(matches!(err, DataError::JsonError(_)));
}

#[test]
fn test_registered_directive_runs_in_document_order() {
    let mut binder = Binder::new();
    binder
        .register(
            "href",
            |doc: &mut Document, site: &DirectiveSite, value: &Value| -> Result<(), BindError> {
                let url = value
                    .as_str()
                    .ok_or_else(|| BindError::handler(&site.kind, "url must be a string"))?;
                doc.set_attribute(site.node, "href", url);
                Ok(())
            },
        )
        .unwrap();

    let template = binder
        .define_markup(r#"<a href:="url" content:="label"></a>"#)
        .unwrap();
    let kinds: Vec<_> = template.sites().iter().map(|s| s.kind.as_str()).collect();
    assert_eq!(kinds, vec!["href", "content"]);

    let output = template
        .instantiate(&Data::new().with("url", "/home").with("label", "Home"))
        .unwrap();
    assert_eq!(output.to_html(), r#"<a href="/home">Home</a>"#);

    let err = template
        .instantiate(&Data::new().with("url", 1).with("label", "Home"))
        .unwrap_err();
    assert_eq!(err, BindError::handler("href", "url must be a string"));
}

#[test]
fn test_templates_keep_their_registry_snapshot() {
    let mut binder = Binder::with_config(
        BinderConfig::new().with_unknown_directive(UnknownDirectivePolicy::Ignore),
    );
    let before = binder.define_markup(r#"<p shout:="k"></p>"#).unwrap();

    binder
        .register(
            "shout",
            |doc: &mut Document, site: &DirectiveSite, value: &Value| -> Result<(), BindError> {
                let text = value.as_str().unwrap_or_default().to_uppercase();
                doc.set_text_content(site.node, text);
                Ok(())
            },
        )
        .unwrap();
    let after = binder.define_markup(r#"<p shout:="k"></p>"#).unwrap();

    let data = Data::new().with("k", "hi");
    assert!(before.sites().is_empty());
    assert_eq!(
        before.instantiate(&data).unwrap().to_html(),
        r#"<p shout:="k"></p>"#
    );
    assert_eq!(after.instantiate(&data).unwrap().to_html(), "<p>HI</p>");
}

#[test]
fn test_binder_without_builtins() {
    let binder = Binder::with_registry(BinderConfig::default(), DirectiveRegistry::new());
    let template = binder.define_markup(r#"<p content:="k"></p>"#).unwrap();
    assert!(template.sites().is_empty());
}
