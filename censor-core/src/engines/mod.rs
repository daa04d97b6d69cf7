// censor-core/src/engines/mod.rs
//! This module contains the detector engine implementations.
//!
//! Each engine is a separate file within this directory and implements the
//! `CensorEngine` trait. This modular design allows for easy addition of new
//! detection strategies alongside the reference word-list engine.
//!
//! To add a new engine, create a new file (e.g., `phrase_engine.rs`), define
//! its logic, and declare it here using `pub mod <engine_name>;`.

pub mod word_list;
