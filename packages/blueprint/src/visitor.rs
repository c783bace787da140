use crate::node::{Column, Field, Fieldset, NormalizedBlueprint, Section, Tab};

/// Visitor pattern for traversing a normalized blueprint
///
/// The default implementations walk the entire tree. Override specific
/// `visit_*` methods to act on nodes; call the matching `walk_*` function
/// to keep descending.
pub trait Visitor: Sized {
    fn visit_blueprint(&mut self, blueprint: &NormalizedBlueprint) {
        walk_blueprint(self, blueprint);
    }

    fn visit_tab(&mut self, tab: &Tab) {
        walk_tab(self, tab);
    }

    fn visit_column(&mut self, column: &Column) {
        walk_column(self, column);
    }

    fn visit_section(&mut self, section: &Section) {
        walk_section(self, section);
    }

    fn visit_field(&mut self, field: &Field) {
        walk_field(self, field);
    }

    fn visit_fieldset(&mut self, _name: &str, fieldset: &Fieldset) {
        walk_fieldset(self, fieldset);
    }
}

// Default walk implementations

pub fn walk_blueprint<V: Visitor>(visitor: &mut V, blueprint: &NormalizedBlueprint) {
    for tab in blueprint.tabs.values() {
        visitor.visit_tab(tab);
    }
}

pub fn walk_tab<V: Visitor>(visitor: &mut V, tab: &Tab) {
    for column in &tab.columns {
        visitor.visit_column(column);
    }
}

pub fn walk_column<V: Visitor>(visitor: &mut V, column: &Column) {
    for section in column.sections.values() {
        visitor.visit_section(section);
    }
}

pub fn walk_section<V: Visitor>(visitor: &mut V, section: &Section) {
    if let Some(fields) = &section.fields {
        for field in fields.values() {
            visitor.visit_field(field);
        }
    }
}

pub fn walk_field<V: Visitor>(visitor: &mut V, field: &Field) {
    if let Some(fields) = &field.fields {
        for child in fields.values() {
            visitor.visit_field(child);
        }
    }

    if let Some(fieldsets) = &field.fieldsets {
        for (name, fieldset) in fieldsets.iter() {
            visitor.visit_fieldset(name, fieldset);
        }
    }
}

pub fn walk_fieldset<V: Visitor>(visitor: &mut V, fieldset: &Fieldset) {
    match fieldset {
        Fieldset::Defined(definition) => {
            for tab in definition.tabs.values() {
                for field in tab.fields.values() {
                    visitor.visit_field(field);
                }
            }
        }
        Fieldset::Reference(_) => {
            // Unresolved name, nothing to walk
        }
    }
}

/// Collects the sections of a blueprint; later names replace earlier ones
#[derive(Debug, Default)]
pub(crate) struct SectionCollector {
    pub sections: crate::ordered_map::OrderedMap<Section>,
}

impl Visitor for SectionCollector {
    fn visit_section(&mut self, section: &Section) {
        self.sections.insert(section.name.clone(), section.clone());
    }
}

/// Collects the top-level fields of all sections; the first name wins
#[derive(Debug, Default)]
pub(crate) struct FieldCollector {
    pub fields: crate::ordered_map::OrderedMap<Field>,
}

impl Visitor for FieldCollector {
    fn visit_field(&mut self, field: &Field) {
        if !self.fields.contains_key(&field.name) {
            self.fields.insert(field.name.clone(), field.clone());
        }
    }
}
