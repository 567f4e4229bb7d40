use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::model::SiteContent;
use super::section::Section;
use crate::error::EditError;

/// An in-memory, not-yet-persisted copy of the document being edited.
///
/// Created by [`SiteContent::begin_edit`]; holds raw per-section JSON so
/// the admin panel can address fields by string key, including fields
/// the typed model does not know about. Every operation either applies
/// fully or returns an [`EditError`] leaving the buffer untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct EditingBuffer {
    sections: BTreeMap<Section, Value>,
}

impl EditingBuffer {
    pub(crate) fn from_sections(sections: BTreeMap<Section, Value>) -> Self {
        Self { sections }
    }

    /// Set one scalar field inside an object section. Unknown fields are
    /// inserted rather than rejected.
    pub fn set_field(
        &mut self,
        section: Section,
        field: &str,
        value: Value,
    ) -> Result<(), EditError> {
        if section.is_array() {
            return Err(EditError::NotAnObjectSection(section));
        }
        self.object_mut(section).insert(field.to_string(), value);
        Ok(())
    }

    /// Set one field of the item at `index` in a list section.
    pub fn set_array_item(
        &mut self,
        section: Section,
        index: usize,
        field: &str,
        value: Value,
    ) -> Result<(), EditError> {
        if !section.is_array() {
            return Err(EditError::NotAnArraySection(section));
        }
        let items = self.array_mut(section);
        let item = items
            .get_mut(index)
            .ok_or(EditError::IndexOutOfRange { section, index })?;
        if !item.is_object() {
            *item = Value::Object(Map::new());
        }
        let fields = item.as_object_mut().expect("item normalized to an object");
        fields.insert(field.to_string(), value);
        Ok(())
    }

    /// Append an item to the end of a list section.
    pub fn append_array_item(&mut self, section: Section, item: Value) -> Result<(), EditError> {
        if !section.is_array() {
            return Err(EditError::NotAnArraySection(section));
        }
        self.array_mut(section).push(item);
        Ok(())
    }

    /// Remove the item at `index`, shifting later items down by one.
    /// An out-of-range index is an error, not a silent no-op.
    pub fn remove_array_item(&mut self, section: Section, index: usize) -> Result<(), EditError> {
        if !section.is_array() {
            return Err(EditError::NotAnArraySection(section));
        }
        let items = self.array_mut(section);
        if index >= items.len() {
            return Err(EditError::IndexOutOfRange { section, index });
        }
        items.remove(index);
        Ok(())
    }

    /// Current payload of one section.
    pub fn section_value(&self, section: Section) -> Value {
        self.sections.get(&section).cloned().unwrap_or(Value::Null)
    }

    /// Read back one field of an object section.
    pub fn field(&self, section: Section, field: &str) -> Option<&Value> {
        self.sections.get(&section)?.as_object()?.get(field)
    }

    /// Re-totalize into a document. A section left in an undecodable
    /// state falls back to its default rather than failing the commit.
    pub fn into_content(self) -> SiteContent {
        SiteContent::from_sections(self.sections)
    }

    fn object_mut(&mut self, section: Section) -> &mut Map<String, Value> {
        let slot = self
            .sections
            .entry(section)
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        slot.as_object_mut().expect("slot normalized to an object")
    }

    fn array_mut(&mut self, section: Section) -> &mut Vec<Value> {
        let slot = self
            .sections
            .entry(section)
            .or_insert_with(|| Value::Array(Vec::new()));
        if !slot.is_array() {
            *slot = Value::Array(Vec::new());
        }
        slot.as_array_mut().expect("slot normalized to an array")
    }
}
