pub mod creators;
pub mod phones;
pub mod vas;
