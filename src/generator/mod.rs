pub(crate) mod audio;
pub(crate) mod context;
