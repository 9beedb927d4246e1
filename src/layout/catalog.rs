// Tue Aug 04 2026 - Alex

use crate::layout::{LayoutError, StructLayout};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct TypeCatalog {
    structs: HashMap<String, StructLayout>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ProfileStruct {
    size: usize,
    fields: HashMap<String, ProfileField>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ProfileField {
    offset: u64,
    size: usize,
}

// NT heap geometry for 64-bit Windows 10 builds. Only the fields the
// traversal dereferences are listed; everything else in the real records is
// opaque padding as far as the walk is concerned.
static WINDOWS_10_X64: Lazy<TypeCatalog> = Lazy::new(|| {
    let mut catalog = TypeCatalog::empty();

    catalog.insert(
        StructLayout::new("_LIST_ENTRY", 0x10)
            .with_field("Flink", 0x0, 8)
            .with_field("Blink", 0x8, 8),
    );

    catalog.insert(
        StructLayout::new("_HEAP_ENTRY", 0x10)
            .with_field("PreviousBlockPrivateData", 0x0, 8)
            .with_field("Size", 0x8, 2)
            .with_field("Flags", 0xa, 1)
            .with_field("SmallTagIndex", 0xb, 1)
            .with_field("PreviousSize", 0xc, 2)
            .with_field("SegmentOffset", 0xe, 1)
            .with_field("UnusedBytes", 0xf, 1),
    );

    catalog.insert(
        StructLayout::new("_HEAP_SEGMENT", 0x78)
            .with_field("Entry", 0x0, 0x10)
            .with_field("SegmentSignature", 0x10, 4)
            .with_field("SegmentFlags", 0x14, 4)
            .with_field("SegmentListEntry", 0x18, 0x10)
            .with_field("Heap", 0x28, 8)
            .with_field("BaseAddress", 0x38, 8)
            .with_field("NumberOfPages", 0x40, 8)
            .with_field("FirstEntry", 0x48, 8)
            .with_field("LastValidEntry", 0x50, 8),
    );

    catalog.insert(
        StructLayout::new("_HEAP", 0x2c0)
            .with_field("Segment", 0x0, 0x78)
            .with_field("Flags", 0x70, 4)
            .with_field("ForceFlags", 0x74, 4)
            .with_field("EncodeFlagMask", 0x7c, 4)
            .with_field("Encoding", 0x80, 0x10)
            .with_field("SegmentList", 0x120, 0x10),
    );

    catalog
});

impl TypeCatalog {
    pub fn empty() -> Self {
        Self { structs: HashMap::new() }
    }

    pub fn windows_10_x64() -> &'static TypeCatalog {
        &WINDOWS_10_X64
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, LayoutError> {
        let file = File::open(path)?;
        let profile: HashMap<String, ProfileStruct> = serde_json::from_reader(file)?;

        let mut catalog = Self::empty();
        for (name, raw) in profile {
            let mut layout = StructLayout::new(name, raw.size);
            let mut fields: Vec<_> = raw.fields.into_iter().collect();
            fields.sort_by_key(|(_, f)| f.offset);
            for (field_name, field) in fields {
                layout = layout.with_field(&field_name, field.offset, field.size);
            }
            catalog.insert(layout);
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, layout: StructLayout) {
        self.structs.insert(layout.name().to_string(), layout);
    }

    pub fn layout(&self, name: &str) -> Result<&StructLayout, LayoutError> {
        self.structs
            .get(name)
            .ok_or_else(|| LayoutError::UnknownStruct(name.to_string()))
    }

    pub fn struct_count(&self) -> usize {
        self.structs.len()
    }
}
