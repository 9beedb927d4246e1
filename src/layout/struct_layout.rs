// Mon Aug 03 2026 - Alex

use crate::layout::{FieldLayout, LayoutError};

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct StructLayout {
    name: String,
    size: usize,
    fields: Vec<FieldLayout>,
    field_map: HashMap<String, usize>,
}

impl StructLayout {
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
            fields: Vec::new(),
            field_map: HashMap::new(),
        }
    }

    pub fn with_field(mut self, name: &str, offset: u64, size: usize) -> Self {
        self.add_field(FieldLayout::new(name, offset, size));
        self
    }

    pub fn add_field(&mut self, field: FieldLayout) {
        let index = self.fields.len();
        self.field_map.insert(field.name().to_string(), index);
        self.fields.push(field);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn fields(&self) -> &[FieldLayout] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Result<&FieldLayout, LayoutError> {
        self.field_map
            .get(name)
            .map(|&idx| &self.fields[idx])
            .ok_or_else(|| LayoutError::UnknownField(self.name.clone(), name.to_string()))
    }

    pub fn offset_of(&self, name: &str) -> Result<u64, LayoutError> {
        Ok(self.field(name)?.offset())
    }
}
