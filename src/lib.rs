/// Raw configuration tables and the sources that serve them
pub mod data;
/// Error definitions
pub mod error;
/// Resolution of raw records into ships, weapons, and skills
pub mod game_params;
/// Game concept types (stats, nations, armor) and id conventions.
pub mod game_types;
/// Generic wrapper for values that may or may not match a known variant.
pub mod recognized;

#[cfg(test)]
mod test_support;

pub use data::{ConfigSource, Record, Table, TableStore};
pub use error::{Error, ErrorKind, IResult};
pub use game_params::{ResolveOptions, Resolver};

#[cfg(feature = "arc")]
pub type Rc<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub type Rc<T> = std::rc::Rc<T>;
