pub mod defaults;
pub mod loader;
pub mod pack;
pub mod wishes;

pub use defaults::{default_pack, DEFAULT_PACK_ID};
pub use loader::{write_template, ContentLoader, PackMetadata};
pub use pack::{CardCover, ContentPack, Photo, PhotoCatalog, Waypoint, Wish};
pub use wishes::WishCarousel;
