mod parse_good;
mod render;
mod strings;
