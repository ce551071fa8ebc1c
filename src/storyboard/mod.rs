pub(crate) mod document;
pub(crate) mod export;
pub(crate) mod layer;
pub(crate) mod pool;
pub(crate) mod sprite;
