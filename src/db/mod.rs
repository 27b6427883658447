pub use db::*;
pub use entities::*;

mod db;
mod entities;
