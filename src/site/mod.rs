//! Public storefront: page loaders, banner rotation, layout chrome and the
//! hidden admin gesture.

pub use carousel::*;
pub use gesture::*;
pub use pages::*;
pub use shell::*;

mod carousel;
mod gesture;
mod pages;
mod shell;
