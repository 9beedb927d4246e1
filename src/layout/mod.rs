// Mon Aug 03 2026 - Alex

pub mod catalog;
pub mod error;
pub mod field;
pub mod struct_layout;

pub use catalog::TypeCatalog;
pub use error::LayoutError;
pub use field::FieldLayout;
pub use struct_layout::StructLayout;
