//! Integration tests for defining and instantiating templates

use domjuice::{
    run, Binder, BinderConfig, BindError, Data, DefineError, MarkupFactory, MissingKeyPolicy,
    NodeKind,
};
use pretty_assertions::assert_eq;

#[test]
fn test_literal_binding() {
    let template = Binder::new()
        .define(r#"<p content:="foobar"></p>"#, &MarkupFactory)
        .expect("Should define");
    let output = template
        .instantiate(&Data::new().with("foobar", "test"))
        .expect("Should bind");

    // output.el.firstChild.firstChild.nodeValue
    let doc = output.document();
    let p = doc.first_child(output.el).unwrap();
    assert_eq!(doc.tag_name(p), Some("p"));
    let text = doc.first_child(p).unwrap();
    assert_eq!(doc.kind(text), &NodeKind::Text("test".to_string()));
    assert_eq!(doc.node_value(text), Some("test"));
}

#[test]
fn test_one_shot_run() {
    let output = run(r#"<p content:="foobar"></p>"#, &Data::new().with("foobar", "test"))
        .expect("Should run");
    insta::assert_snapshot!(output.to_html(), @"<p>test</p>");
}

#[test]
fn test_idempotent_parsing() {
    let markup = r#"
        <article>
            <h1 content:="title"></h1>
            <p class="lead" content:="lead"></p>
            <footer><small content:="author"></small></footer>
        </article>
    "#;
    let binder = Binder::new();
    let a = binder.define_markup(markup).unwrap();
    let b = binder.define_markup(markup).unwrap();

    assert_eq!(a.sites(), b.sites());
    let keys: Vec<_> = a.sites().iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, vec!["title", "lead", "author"]);
}

#[test]
fn test_instance_isolation() {
    let template = Binder::new()
        .define_markup(r#"<p content:="foobar"></p>"#)
        .unwrap();
    let mut first = template
        .instantiate(&Data::new().with("foobar", "one"))
        .unwrap();
    let second = template
        .instantiate(&Data::new().with("foobar", "two"))
        .unwrap();

    assert_eq!(first.to_html(), "<p>one</p>");
    assert_eq!(second.to_html(), "<p>two</p>");

    // Mutating one instance leaves the other alone
    let el = first.el;
    let p = first.document().first_child(el).unwrap();
    first.document_mut().set_text_content(p, "changed");
    first.document_mut().set_attribute(p, "id", "x");

    assert_eq!(first.to_html(), r#"<p id="x">changed</p>"#);
    assert_eq!(second.to_html(), "<p>two</p>");
    assert_eq!(template.to_html(), "<p></p>");
}

#[test]
fn test_missing_key_skip_policy() {
    let template = Binder::new()
        .define_markup(r#"<p content:="foobar"></p>"#)
        .unwrap();
    assert_eq!(template.missing_key_policy(), MissingKeyPolicy::Skip);

    let output = template.instantiate(&Data::new()).unwrap();
    let doc = output.document();
    let p = doc.first_child(output.el).unwrap();
    assert_eq!(doc.tag_name(p), Some("p"));
    assert!(doc.children(p).is_empty());
    assert_eq!(doc.text_content(p), "");
}

#[test]
fn test_missing_key_strict_policy() {
    let binder = Binder::with_config(BinderConfig::new().strict());
    let template = binder
        .define_markup(r#"<p content:="present"></p><p content:="foobar"></p>"#)
        .unwrap();

    let err = template
        .instantiate(&Data::new().with("present", "x"))
        .unwrap_err();
    assert_eq!(
        err,
        BindError::MissingBinding {
            kind: "content".to_string(),
            key: "foobar".to_string(),
        }
    );

    // The template survives a failed instantiation
    let output = template
        .instantiate(&Data::new().with("present", "x").with("foobar", "y"))
        .unwrap();
    assert_eq!(output.to_html(), "<p>x</p><p>y</p>");
}

#[test]
fn test_multiple_sibling_sites() {
    let template = Binder::new()
        .define_markup(r#"<ul><li content:="a"></li><li content:="b"></li></ul>"#)
        .unwrap();
    let sites = template.sites();
    assert_eq!(sites.len(), 2);
    assert_eq!(sites[0].path, vec![0, 0]);
    assert_eq!(sites[1].path, vec![0, 1]);

    let output = template
        .instantiate(&Data::new().with("a", "first").with("b", "second"))
        .unwrap();
    insta::assert_snapshot!(output.to_html(), @"<ul><li>first</li><li>second</li></ul>");
}

#[test]
fn test_template_immutability() {
    let markup = r#"<div><span content:="x">placeholder</span><em content:="y"></em></div>"#;
    let binder = Binder::new();
    let template = binder.define_markup(markup).unwrap();

    for i in 0..5 {
        let data = Data::new().with("x", format!("x{}", i)).with("y", i);
        template.instantiate(&data).unwrap();
    }

    let fresh = binder.define_markup(markup).unwrap();
    assert_eq!(template.sites(), fresh.sites());
    assert_eq!(template.document(), fresh.document());
    assert_eq!(
        template.to_html(),
        "<div><span>placeholder</span><em></em></div>"
    );
}

#[test]
fn test_existing_text_is_replaced() {
    let output = run(
        r#"<p content:="k">old</p>"#,
        &Data::new().with("k", "new"),
    )
    .unwrap();
    assert_eq!(output.to_html(), "<p>new</p>");
}

#[test]
fn test_content_replaces_element_children() {
    let output = run(
        r#"<p content:="k"><b>old</b> text</p>"#,
        &Data::new().with("k", "<new>"),
    )
    .unwrap();
    assert_eq!(output.to_html(), "<p>&lt;new&gt;</p>");
}

#[test]
fn test_scalar_values() {
    let data = Data::from_json_str(r#"{"n": 42, "b": true, "z": null}"#).unwrap();
    let output = run(
        r#"<i content:="n"></i><i content:="b"></i><i content:="z">gone</i>"#,
        &data,
    )
    .unwrap();
    assert_eq!(output.to_html(), "<i>42</i><i>true</i><i></i>");
}

#[test]
fn test_structured_value_is_rejected() {
    let data = Data::from_json_str(r#"{"list": [1, 2]}"#).unwrap();
    let template = Binder::new()
        .define_markup(r#"<p content:="list"></p>"#)
        .unwrap();
    let err = template.instantiate(&data).unwrap_err();
    assert!(matches!(err, BindError::NotText { found: "array", .. }));
}

#[test]
fn test_parse_error_has_diagnostics() {
    let source = "<div><p></div>";
    let err = Binder::new().define_markup(source).unwrap_err();
    let DefineError::Parse(errors) = err else {
        panic!("Expected parse error");
    };
    assert!(!errors.is_empty());
    let report = errors[0].format(source, "inline.html");
    assert!(report.contains("inline.html"));
}

#[test]
fn test_whitespace_and_comments_survive() {
    let output = run(
        "<div>\n  <!-- greeting -->\n  <span content:=\"who\"></span>\n</div>",
        &Data::new().with("who", "world"),
    )
    .unwrap();
    assert_eq!(
        output.to_html(),
        "<div>\n  <!-- greeting -->\n  <span>world</span>\n</div>"
    );
}

#[test]
fn test_first_element_skips_leading_text() {
    let output = run("\n<p content:=\"k\"></p>", &Data::new().with("k", "v")).unwrap();
    let p = output.first_element().unwrap();
    assert_eq!(output.document().text_content(p), "v");
}

#[test]
fn test_deeply_nested_markup_is_rejected() {
    let markup = format!("{}{}", "<b>".repeat(20000), "</b>".repeat(20000));
    let err = run(&markup, &Data::new()).unwrap_err();
    assert_eq!(err.parse_errors().len(), 1);
}

#[test]
fn test_everyday_html_parses() {
    let output = run(
        r#"<p content:="k">a < b</p><a href=/x content:="label"></a>"#,
        &Data::new().with("k", "1 < 2").with("label", "home"),
    )
    .unwrap();
    assert_eq!(
        output.to_html(),
        r#"<p>1 &lt; 2</p><a href="/x">home</a>"#
    );
}

#[test]
fn test_content_on_void_element_fails_definition() {
    let err = run(r#"<input content:="k">"#, &Data::new().with("k", "v")).unwrap_err();
    assert!(matches!(
        err,
        domjuice::Error::Define(DefineError::UnsupportedElement { .. })
    ));
}

#[test]
fn test_concurrent_instantiation() {
    let template = Binder::new()
        .define_markup(r#"<p content:="n"></p>"#)
        .unwrap();

    let outputs: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let template = &template;
                scope.spawn(move || {
                    template
                        .instantiate(&Data::new().with("n", i))
                        .unwrap()
                        .to_html()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, html) in outputs.iter().enumerate() {
        assert_eq!(html, &format!("<p>{}</p>", i));
    }
}
