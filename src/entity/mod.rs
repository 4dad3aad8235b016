pub mod carts;

pub use carts::Entity as Carts;
