pub mod colors;
pub mod helpers;
pub mod layout;
pub mod player_bar;
