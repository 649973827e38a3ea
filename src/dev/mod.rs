/// Development utilities module
///
/// This module contains utilities for development and testing,
/// such as a fixture-backed API client.

pub mod mock_client;
