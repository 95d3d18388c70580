//! Text sources feeding the reader: clipboard, websocket and line-oriented input

pub mod clipboard;
pub mod lines;
pub mod ws;
