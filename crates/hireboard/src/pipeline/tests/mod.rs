mod board;
mod common;
mod report;
mod service;
