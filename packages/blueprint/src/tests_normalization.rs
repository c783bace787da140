/// Normalization tests for full blueprints
///
/// These tests verify the canonical tree shape, defaults, removal of
/// disabled entries, group splicing and that a normalized tree normalizes
/// to itself.
use crate::blueprint::Blueprint;
use crate::context::NormalizeContext;
use crate::normalizer::Normalizer;
use folio_common::{Model, StaticModel, StaticTranslator};
use folio_registry::{parse_yaml, BlueprintRegistry, MemoryLoader};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

fn context() -> NormalizeContext {
    NormalizeContext::new(Arc::new(
        BlueprintRegistry::new(MemoryLoader::new()).with_default_presets(),
    ))
}

fn model() -> Arc<dyn Model> {
    Arc::new(StaticModel::new("blog"))
}

fn yaml(source: &str) -> Value {
    parse_yaml(source, Path::new("test.yml")).expect("Failed to parse")
}

fn blueprint(source: &str) -> Blueprint {
    Blueprint::from_value(yaml(source), Some(model()), context()).expect("Failed to build")
}

fn normalize(value: Value) -> Value {
    Blueprint::from_value(value, Some(model()), context())
        .expect("Failed to build")
        .to_value()
        .expect("Failed to serialize")
}

#[test]
fn test_bare_fields_scenario() {
    let output = normalize(json!({ "fields": { "title": { "type": "text" } } }));

    assert_eq!(
        output,
        json!({
            "name": "default",
            "title": "Default",
            "tabs": {
                "main": {
                    "name": "main",
                    "label": "Main",
                    "icon": null,
                    "columns": [{
                        "width": "1/1",
                        "sections": {
                            "main-fields": {
                                "name": "main-fields",
                                "type": "fields",
                                "fields": {
                                    "title": {
                                        "name": "title",
                                        "type": "text",
                                        "label": "Title",
                                        "width": "1/1"
                                    }
                                }
                            }
                        }
                    }]
                }
            }
        })
    );
}

#[test]
fn test_missing_extends_keeps_title() {
    let blueprint = blueprint(
        r#"
extends: missing/blueprint
title: X
"#,
    );

    assert_eq!(blueprint.title(), "X");
    assert!(blueprint.tabs().is_empty());
}

#[test]
fn test_normalization_is_idempotent() {
    let source = r#"
title: Article
icon: text
num: date
tabs:
  content:
    icon: page
    columns:
      - width: 2/3
        fields:
          headline:
            type: text
            required: true
          meta:
            type: group
            when:
              status: published
            fields:
              date: true
              author:
                type: users
          body:
            type: blocks
            fieldsets:
              - heading
              - text
          gallery:
            type: structure
            fields:
              image:
                type: files
                uploads: false
              caption: text
          broken:
            type: bogus
      - width: 1/3
        sections:
          pages:
            type: pages
          weird:
            type: bogus
          empty:
            type: fields
  seo:
    label:
      en: SEO
    columns:
      - sections: {}
  hidden: false
"#;

    let once = blueprint(source).to_value().unwrap();
    let twice = normalize(once.clone());
    let thrice = normalize(twice.clone());

    assert_eq!(once, twice);
    assert_eq!(twice, thrice);
}

#[test]
fn test_false_entries_are_removed() {
    let blueprint = blueprint(
        r#"
tabs:
  content:
    columns:
      - false
      - sections:
          info: false
          content:
            type: fields
            fields:
              text: true
              tags: false
  settings: false
"#,
    );

    let tab_names: Vec<_> = blueprint.tabs().keys().collect();
    assert_eq!(tab_names, vec!["content"]);

    let tab = blueprint.tab("content").unwrap();
    assert_eq!(tab.columns.len(), 1);

    let section_names: Vec<_> = tab.columns[0].sections.keys().collect();
    assert_eq!(section_names, vec!["content"]);

    assert!(blueprint.field("text").is_some());
    assert!(blueprint.field("tags").is_none());
}

#[test]
fn test_group_fields_are_spliced_in_order() {
    let blueprint = blueprint(
        r#"
fields:
  a:
    type: text
  meta:
    type: group
    when:
      status: published
    fields:
      b:
        type: text
        when:
          featured: true
      c:
        type: text
  d:
    type: text
"#,
    );

    let names: Vec<_> = blueprint.fields().keys().collect();
    assert_eq!(names, vec!["a", "b", "c", "d"]);

    let b = blueprint.field("b").unwrap();
    assert_eq!(b.prop("when"), Some(&json!({ "featured": true })));

    let c = blueprint.field("c").unwrap();
    assert_eq!(c.prop("when"), Some(&json!({ "status": "published" })));

    assert!(blueprint.field("a").unwrap().prop("when").is_none());
    assert!(blueprint.field("meta").is_none());
}

#[test]
fn test_group_condition_skips_error_fields() {
    let blueprint = blueprint(
        r#"
fields:
  meta:
    type: group
    when:
      status: published
    fields:
      hint:
        type: info
        text: Only for published pages
      broken:
        type: bogus
"#,
    );

    let hint = blueprint.field("hint").unwrap();
    assert_eq!(hint.prop("when"), Some(&json!({ "status": "published" })));

    let broken = blueprint.field("broken").unwrap();
    assert!(broken.is_negative());
    assert!(broken.prop("when").is_none());
}

#[test]
fn test_group_field_replaces_earlier_sibling_in_place() {
    let blueprint = blueprint(
        r#"
fields:
  a:
    type: text
  b:
    type: textarea
  meta:
    type: group
    fields:
      b:
        type: text
      c:
        type: text
"#,
    );

    let names: Vec<_> = blueprint.fields().keys().collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(blueprint.field("b").unwrap().field_type, "text");
}

#[test]
fn test_empty_group_is_removed() {
    let blueprint = blueprint(
        r#"
fields:
  text: true
  meta:
    type: group
"#,
    );

    let names: Vec<_> = blueprint.fields().keys().collect();
    assert_eq!(names, vec!["text"]);
    assert!(blueprint.diagnostics().iter().any(|d| d.rule == "empty-group"));
}

#[test]
fn test_empty_column_gets_one_info_section() {
    let blueprint = blueprint(
        r#"
tabs:
  content:
    columns:
      - width: 1/2
        sections: {}
      - width: 1/2
        sections:
          gone: false
"#,
    );

    let tab = blueprint.tab("content").unwrap();
    for (index, column) in tab.columns.iter().enumerate() {
        assert_eq!(column.sections.len(), 1);

        let (name, section) = column.sections.first().unwrap();
        assert_eq!(name, format!("content-info-{}", index));
        assert_eq!(section.section_type, "info");
        assert_eq!(section.prop("label"), Some(&json!("Column (1/2)")));
        assert_eq!(section.prop("text"), Some(&json!("No sections yet")));
    }
}

#[test]
fn test_empty_fields_section_gets_one_placeholder_field() {
    let blueprint = blueprint(
        r#"
tabs:
  content:
    sections:
      main:
        type: fields
        fields:
          title: false
"#,
    );

    let section = blueprint.section("main").unwrap();
    let fields = section.fields.as_ref().unwrap();
    assert_eq!(fields.len(), 1);

    let placeholder = fields.get("content-info").unwrap();
    assert_eq!(placeholder.field_type, "info");
    assert_eq!(placeholder.label, "Fields");
    assert_eq!(placeholder.prop("text"), Some(&json!("No fields yet")));
}

#[test]
fn test_placeholder_field_label_is_translated() {
    let mut translator = StaticTranslator::new("de");
    translator.insert("de", "fields", "Felder");
    let ctx = context().with_translator(Arc::new(translator));

    let blueprint = Blueprint::from_value(
        yaml("sections:\n  main:\n    type: fields\n"),
        Some(model()),
        ctx,
    )
    .expect("Failed to build");

    let fields = blueprint.section("main").unwrap().fields.as_ref().unwrap();
    assert_eq!(fields.get("main-info").unwrap().label, "Felder");
}

#[test]
fn test_field_defaults() {
    let blueprint = blueprint(
        r#"
fields:
  text: true
  subtitle:
    type: text
    label: Sub title
    width: 1/2
    help: Shown below the title
"#,
    );

    let text = blueprint.field("text").unwrap();
    assert_eq!(text.field_type, "text");
    assert_eq!(text.label, "Text");
    assert_eq!(text.width, "1/1");

    let subtitle = blueprint.field("subtitle").unwrap();
    assert_eq!(subtitle.label, "Sub title");
    assert_eq!(subtitle.width, "1/2");
    assert_eq!(subtitle.prop("help"), Some(&json!("Shown below the title")));
}

#[test]
fn test_labels_are_translated() {
    let mut translator = StaticTranslator::new("de");
    translator.insert("de", "unused", "Unbenutzt");
    let ctx = context().with_translator(Arc::new(translator));

    let value = yaml(
        r#"
title:
  en: Article
  de: Artikel
tabs:
  content:
    label:
      en: Content
      de: Inhalt
    fields:
      title:
        type: text
        label:
          en: Title
          de: Titel
"#,
    );

    let blueprint = Blueprint::from_value(value, Some(model()), ctx).unwrap();
    assert_eq!(blueprint.title(), "Artikel");
    assert_eq!(blueprint.tab("content").unwrap().label, "Inhalt");
    assert_eq!(blueprint.field("title").unwrap().label, "Titel");
}

#[test]
fn test_tab_link_uses_panel_url() {
    let model: Arc<dyn Model> =
        Arc::new(StaticModel::new("blog").with_panel_url("https://example.com/panel/pages/blog"));
    let blueprint = Blueprint::from_value(
        yaml("fields:\n  text: true\n"),
        Some(model),
        context(),
    )
    .unwrap();

    assert_eq!(
        blueprint.tab("main").unwrap().link.as_deref(),
        Some("https://example.com/panel/pages/blog/?tab=main")
    );
}

#[test]
fn test_duplicate_field_names_become_errors() {
    let blueprint = blueprint(
        r#"
tabs:
  content:
    fields:
      title:
        type: text
  seo:
    fields:
      title:
        type: text
        label: SEO title
"#,
    );

    let seo_fields = blueprint
        .section("seo-fields")
        .and_then(|section| section.fields.as_ref())
        .unwrap();
    let duplicate = seo_fields.get("title").unwrap();

    assert!(duplicate.is_negative());
    assert_eq!(duplicate.label, "SEO title");
    assert_eq!(
        duplicate.prop("text"),
        Some(&json!(
            "The field name <strong>\"title\"</strong> already exists in your blueprint."
        ))
    );

    // the projection keeps the first definition
    assert_eq!(blueprint.field("title").unwrap().field_type, "text");
    assert!(blueprint.diagnostics().iter().any(|d| d.rule == "duplicate-field"));
}

#[test]
fn test_page_preset() {
    let blueprint = blueprint(
        r#"
title: Article
preset: page
fields:
  text: true
files: Attachments
"#,
    );

    let tab = blueprint.tab("main").unwrap();
    assert_eq!(tab.columns.len(), 2);
    assert_eq!(tab.columns[0].width, "2/3");
    assert_eq!(tab.columns[1].width, "1/3");

    let fields_section = blueprint.section("main-col-0-fields").unwrap();
    assert_eq!(fields_section.section_type, "fields");
    assert!(blueprint.field("text").is_some());

    let files = blueprint.section("files").unwrap();
    assert_eq!(files.prop("label"), Some(&json!("Attachments")));
    assert_eq!(blueprint.section("pages").unwrap().prop("status"), Some(&json!("all")));
    assert!(blueprint.prop_unsafe("preset").is_none());
}

#[test]
fn test_tab_level_preset() {
    let blueprint = blueprint(
        r#"
tabs:
  children:
    preset: pages
    unlisted: true
"#,
    );

    let names: Vec<_> = blueprint.sections().keys().collect();
    assert_eq!(names, vec!["drafts", "unlisted", "listed"]);
    assert_eq!(
        blueprint.section("listed").unwrap().prop("label"),
        Some(&json!("Published"))
    );
}

#[test]
fn test_normalizer_levels_are_idempotent() {
    let ctx = context();

    let fields_input = json!({
        "text": true,
        "meta": { "type": "group", "fields": { "date": true } },
        "nope": false,
        "broken": { "type": "bogus" }
    });
    let once = Normalizer::new(&ctx).normalize_fields(fields_input);
    let twice = Normalizer::new(&ctx).normalize_fields(serde_json::to_value(&once).unwrap());
    assert_eq!(once, twice);

    let sections_input = json!({
        "main": { "type": "fields", "fields": { "text": true } },
        "bogus": { "type": "bogus" },
        "empty": { "type": "fields" }
    });
    let once = Normalizer::new(&ctx).normalize_sections("main", sections_input);
    let twice =
        Normalizer::new(&ctx).normalize_sections("main", serde_json::to_value(&once).unwrap());
    assert_eq!(once, twice);

    let columns_input = json!([{ "fields": { "text": true } }, { "sections": {} }]);
    let once = Normalizer::new(&ctx).normalize_columns("main", columns_input);
    let twice =
        Normalizer::new(&ctx).normalize_columns("main", serde_json::to_value(&once).unwrap());
    assert_eq!(once, twice);

    let tabs_input = json!({ "content": { "fields": { "text": true } }, "off": false });
    let once = Normalizer::new(&ctx).normalize_tabs(tabs_input);
    let twice = Normalizer::new(&ctx).normalize_tabs(serde_json::to_value(&once).unwrap());
    assert_eq!(once, twice);
}

#[test]
fn test_normalization_is_deterministic() {
    let source = r#"
fields:
  date: true
  text:
    type: textarea
  tags: true
"#;

    let results: Vec<Value> = (0..5)
        .map(|_| blueprint(source).to_value().unwrap())
        .collect();

    for i in 1..results.len() {
        assert_eq!(results[0], results[i], "Normalization {} differs from 0", i);
    }
}
