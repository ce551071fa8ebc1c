pub(crate) mod command;
pub(crate) mod ease;
pub(crate) mod timeline;
pub(crate) mod trigger;
pub(crate) mod value;
