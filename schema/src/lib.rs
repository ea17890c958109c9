// PokeMeme Battle Schema - Shared type definitions
// This crate holds the content types shared between the main pokememe-battle
// crate and its build script, so the RON content can be validated at compile
// time and embedded with postcard.

pub use encounter_data::*;
pub use meme_types::*;
pub use move_data::*;
pub use species_data::*;

pub mod encounter_data;
pub mod meme_types;
pub mod move_data;
pub mod species_data;
