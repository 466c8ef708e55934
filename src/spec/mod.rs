pub mod editor;
pub mod serializer;
pub mod spec_model;
