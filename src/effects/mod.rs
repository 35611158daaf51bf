pub(crate) mod catalog;
pub(crate) mod compiler;
pub(crate) mod value;
