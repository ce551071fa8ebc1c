pub(crate) mod compositor;
pub(crate) mod settings;
pub(crate) mod stats;
pub(crate) mod texture;
