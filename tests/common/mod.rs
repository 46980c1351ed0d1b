//! Common test utilities for isotherm.
//!
//! This module provides shared utilities for testing the isotherm library and server.
#![allow(dead_code)]

pub mod assertions;
pub mod http_client;
pub mod image_utils;
pub mod test_data;
