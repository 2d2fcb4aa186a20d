//! Infrastructure layer - connection bootstrap and store error translation.

pub mod db;
pub mod db_errors;
