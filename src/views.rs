// Terminal views

pub mod commit_list;
pub mod help;
pub mod message_input;
