//! Main module for viewtree library functionality

pub mod lexing;
pub mod scanning;
pub mod testing;
pub mod token;
