pub mod dto;
pub mod editor;
pub mod forms;
pub mod qa;
