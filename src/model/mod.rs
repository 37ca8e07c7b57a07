// src/model/mod.rs
//! Domain model: the raw block tree, page metadata, and database rows.

mod block;
mod page;
mod row;

pub use block::{
    Block, BlockPayload, ChildDatabasePayload, CodePayload, ExternalFile, FileObject, NotionFile,
    TablePayload, TableRowPayload, TextPayload, ToDoPayload,
};
pub use page::PageInfo;
pub use row::{
    DatabaseRow, DateValue, FileRef, FormulaResult, PersonRef, PropertyValue, RelationRef,
    RollupResult, SelectOption,
};
