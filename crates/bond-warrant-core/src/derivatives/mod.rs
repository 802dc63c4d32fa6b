pub mod normal;
pub mod warrant;
