mod bundle;
mod pair;
mod token;

pub use bundle::{Bundle, BUNDLE_ID};
pub use pair::Pair;
pub use token::Token;
