//! Integration tests for decoding HTML into annotated structs.

mod config;
mod converter;
mod scenarios;
