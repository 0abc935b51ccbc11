pub mod search;
pub mod text_match;
