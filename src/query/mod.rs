// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query strings: building them from questions, and parsing them back into
//! something an index can evaluate.

pub mod builder;
pub mod parser;

pub use builder::{combine, escape_symbols, field_query, CandidateQuery, QueryBuilder, QueryTarget};
pub use parser::{Clause, Occur, Query, QueryParser};
