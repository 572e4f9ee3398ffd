pub mod import;
pub mod recruiting;
