mod common;
mod triagem;
