/// Accepted file template tests on full blueprints
use crate::blueprint::Blueprint;
use crate::context::NormalizeContext;
use crate::node::Fieldset;
use folio_common::{Model, StaticModel};
use folio_registry::{parse_yaml, BlueprintRegistry, MemoryLoader};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;

fn blueprint_for(model_id: &str, source: &str) -> Blueprint {
    let value = parse_yaml(source, Path::new("test.yml")).expect("Failed to parse");
    let model: Arc<dyn Model> = Arc::new(StaticModel::new(model_id));
    let ctx = NormalizeContext::new(Arc::new(
        BlueprintRegistry::new(MemoryLoader::new()).with_default_presets(),
    ));

    Blueprint::from_value(value, Some(model), ctx).expect("Failed to build")
}

const ARTICLE: &str = r#"
tabs:
  content:
    columns:
      - width: 2/3
        fields:
          cover:
            type: files
            uploads:
              template: cover
          attachments:
            type: files
            uploads:
              parent: site
              template: download
          text:
            type: textarea
            uploads: inline
      - width: 1/3
        sections:
          gallery:
            type: files
            template: image
          pages:
            type: pages
"#;

#[test]
fn test_foreign_upload_parent_is_excluded() {
    let blueprint = blueprint_for("blog/article", ARTICLE);

    assert_eq!(
        blueprint.accepted_file_templates(None),
        vec!["cover", "inline", "image"]
    );
}

#[test]
fn test_matching_upload_parent_is_included() {
    let blueprint = blueprint_for("site", ARTICLE);

    assert_eq!(
        blueprint.accepted_file_templates(None),
        vec!["cover", "download", "inline", "image"]
    );
}

#[test]
fn test_single_section() {
    let blueprint = blueprint_for("blog/article", ARTICLE);

    assert_eq!(blueprint.accepted_file_templates(Some("gallery")), vec!["image"]);
    assert_eq!(
        blueprint.accepted_file_templates(Some("content-col-0-fields")),
        vec!["cover", "inline"]
    );
    assert!(blueprint.accepted_file_templates(Some("pages")).is_empty());
    assert!(blueprint.accepted_file_templates(Some("missing")).is_empty());

    // section lookups do not fill the full-tree cache
    assert_eq!(
        blueprint.accepted_file_templates(None),
        vec!["cover", "inline", "image"]
    );
}

#[test]
fn test_files_preset_template() {
    let blueprint = blueprint_for(
        "blog",
        r#"
preset: files
template: photo
"#,
    );

    assert_eq!(blueprint.accepted_file_templates(None), vec!["photo"]);
}

#[test]
fn test_full_tree_result_is_stable() {
    let blueprint = blueprint_for("blog/article", ARTICLE);

    let first = blueprint.accepted_file_templates(None);
    let second = blueprint.accepted_file_templates(None);
    assert_eq!(first, second);
}

#[test]
fn test_blueprint_without_uploads() {
    let blueprint = blueprint_for(
        "blog",
        r#"
fields:
  title:
    type: text
"#,
    );

    assert!(blueprint.accepted_file_templates(None).is_empty());
}

fn blueprint_with(loader: MemoryLoader, source: &str) -> Blueprint {
    let value = parse_yaml(source, Path::new("test.yml")).expect("Failed to parse");
    let model: Arc<dyn Model> = Arc::new(StaticModel::new("blog"));
    let ctx = NormalizeContext::new(Arc::new(BlueprintRegistry::new(loader)));

    Blueprint::from_value(value, Some(model), ctx).expect("Failed to build")
}

fn gallery_block() -> serde_json::Value {
    json!({
        "name": "Gallery",
        "fields": {
            "images": { "type": "files", "uploads": { "template": "gallery" } }
        }
    })
}

#[test]
fn test_named_fieldsets_resolve_block_blueprints() {
    let loader = MemoryLoader::new()
        .with("blocks/gallery", gallery_block())
        .with("blocks/hero", json!({ "fields": { "cover": { "type": "files", "uploads": "hero" } } }));

    let blueprint = blueprint_with(
        loader,
        r#"
fields:
  text:
    type: blocks
    fieldsets:
      - gallery
      - heading
  layout:
    type: layout
    fieldsets:
      hero: true
      teaser: blocks/hero
"#,
    );

    assert_eq!(
        blueprint.accepted_file_templates(None),
        vec!["gallery", "hero"]
    );

    let fieldsets = blueprint.field("text").unwrap().fieldsets.as_ref().unwrap();
    assert!(matches!(fieldsets.get("gallery"), Some(Fieldset::Defined(_))));
    // unknown names stay references
    assert!(matches!(fieldsets.get("heading"), Some(Fieldset::Reference(_))));

    let layout = blueprint.field("layout").unwrap().fieldsets.as_ref().unwrap();
    assert!(matches!(layout.get("hero"), Some(Fieldset::Defined(_))));
    assert!(matches!(layout.get("teaser"), Some(Fieldset::Defined(_))));
}

#[test]
fn test_resolved_fieldsets_are_idempotent() {
    let loader = || MemoryLoader::new().with("blocks/gallery", gallery_block());
    let source = "fields:\n  text:\n    type: blocks\n    fieldsets: [gallery]\n";

    let first = blueprint_with(loader(), source).to_value().unwrap();
    let second = Blueprint::from_value(
        first.clone(),
        Some(Arc::new(StaticModel::new("blog"))),
        NormalizeContext::new(Arc::new(BlueprintRegistry::new(loader()))),
    )
    .unwrap()
    .to_value()
    .unwrap();

    assert_eq!(first, second);
}
