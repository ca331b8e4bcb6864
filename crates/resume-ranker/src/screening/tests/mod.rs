mod common;
mod ordering;
