pub use entity::*;
pub use entity_kind::*;
pub use opaque::*;
pub use own_brand::*;
pub use setting::*;
pub use slide::*;
pub use store::*;

mod entity;
mod entity_kind;
mod opaque;
mod own_brand;
mod setting;
mod slide;
mod store;
