mod analysis;
mod common;
mod scoring;
