pub mod admin;
pub mod backend;
pub mod chat;
pub mod man;
pub mod result;
pub mod ui;
