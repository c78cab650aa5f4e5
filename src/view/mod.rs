pub mod confirm;
pub mod filter;
pub mod form;
pub mod pages;
pub mod roster;
pub mod state;
