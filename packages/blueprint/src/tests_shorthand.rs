/// Shorthand equivalence tests
///
/// Every shorthand level must normalize to exactly the same tree as the
/// fully expanded `tabs → columns → sections → fields` form.
use crate::blueprint::Blueprint;
use crate::context::NormalizeContext;
use folio_common::StaticModel;
use folio_registry::{parse_yaml, BlueprintRegistry, MemoryLoader};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

fn normalize_with(loader: MemoryLoader, source: &str) -> Value {
    let value = parse_yaml(source, Path::new("test.yml")).expect("Failed to parse");
    let ctx = NormalizeContext::new(Arc::new(BlueprintRegistry::new(loader)));

    Blueprint::from_value(value, Some(Arc::new(StaticModel::new("blog"))), ctx)
        .expect("Failed to build")
        .to_value()
        .expect("Failed to serialize")
}

fn normalize(source: &str) -> Value {
    normalize_with(MemoryLoader::new(), source)
}

#[test]
fn test_all_levels_are_equivalent() {
    let fields = normalize(
        r#"
title: Article
fields:
  headline:
    type: text
  text:
    type: textarea
"#,
    );

    let sections = normalize(
        r#"
title: Article
sections:
  main-fields:
    type: fields
    fields:
      headline:
        type: text
      text:
        type: textarea
"#,
    );

    let columns = normalize(
        r#"
title: Article
columns:
  - sections:
      main-fields:
        type: fields
        fields:
          headline:
            type: text
          text:
            type: textarea
"#,
    );

    let tabs = normalize(
        r#"
title: Article
tabs:
  main:
    columns:
      - width: 1/1
        sections:
          main-fields:
            type: fields
            fields:
              headline:
                type: text
              text:
                type: textarea
"#,
    );

    assert_eq!(fields, sections);
    assert_eq!(sections, columns);
    assert_eq!(columns, tabs);
}

#[test]
fn test_tab_level_shorthand() {
    let shorthand = normalize(
        r#"
tabs:
  content:
    fields:
      text: true
"#,
    );

    let expanded = normalize(
        r#"
tabs:
  content:
    columns:
      - width: 1/1
        sections:
          content-fields:
            type: fields
            fields:
              text:
                type: text
"#,
    );

    assert_eq!(shorthand, expanded);
}

#[test]
fn test_column_level_shorthand() {
    let shorthand = normalize(
        r#"
columns:
  - width: 1/2
    fields:
      text: true
"#,
    );

    let expanded = normalize(
        r#"
columns:
  - width: 1/2
    sections:
      main-col-0-fields:
        type: fields
        fields:
          text: true
"#,
    );

    assert_eq!(shorthand, expanded);
}

#[test]
fn test_field_value_shorthands() {
    let output = normalize(
        r#"
fields:
  text:
  date: true
  tags: {}
"#,
    );

    let fields = &output["tabs"]["main"]["columns"][0]["sections"]["main-fields"]["fields"];
    for (name, label) in [("text", "Text"), ("date", "Date"), ("tags", "Tags")] {
        assert_eq!(
            fields[name],
            json!({ "name": name, "type": name, "label": label, "width": "1/1" })
        );
    }
}

#[test]
fn test_string_shorthand_extends() {
    let loader = MemoryLoader::new()
        .with("fields/seo", json!({ "type": "group", "fields": { "description": { "type": "textarea" } } }))
        .with("sections/gallery", json!({ "type": "files", "template": "image" }))
        .with("tabs/seo", json!({ "label": "SEO", "fields": { "keywords": { "type": "tags" } } }));

    let output = normalize_with(
        loader,
        r#"
tabs:
  content:
    sections:
      gallery: sections/gallery
      content:
        type: fields
        fields:
          title:
            type: text
          seo: fields/seo
  seo: tabs/seo
"#,
    );

    let content = &output["tabs"]["content"]["columns"][0]["sections"];
    assert_eq!(content["gallery"]["type"], "files");
    assert_eq!(content["gallery"]["template"], "image");

    let field_names: Vec<_> = content["content"]["fields"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(field_names, vec!["title", "description"]);

    let seo = &output["tabs"]["seo"];
    assert_eq!(seo["label"], "SEO");
    assert_eq!(
        seo["columns"][0]["sections"]["seo-fields"]["fields"]["keywords"]["type"],
        "tags"
    );
}

#[test]
fn test_extended_blueprint_matches_inline_definition() {
    let loader = MemoryLoader::new().with(
        "layouts/article",
        json!({ "icon": "text", "fields": { "text": { "type": "textarea" } } }),
    );

    let extended = normalize_with(
        loader,
        r#"
extends: layouts/article
title: News
"#,
    );

    let inline = normalize(
        r#"
title: News
icon: text
fields:
  text:
    type: textarea
"#,
    );

    assert_eq!(extended, inline);
}
