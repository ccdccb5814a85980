pub mod agari;
pub mod extract;
pub mod machi;
pub mod search;
