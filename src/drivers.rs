pub use self::uc8179::*;

mod uc8179;
