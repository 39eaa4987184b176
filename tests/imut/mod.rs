mod adapter;
mod discover;
