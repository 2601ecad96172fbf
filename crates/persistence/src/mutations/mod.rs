// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutations, backend-agnostic Diesel DSL.
//!
//! Every multi-row mutation runs inside `immediate_transaction` so the
//! SQLite write lock is taken before the planning snapshot is read. A
//! plan rejection propagates out of the closure and rolls back the
//! transaction, including any audit rows.

pub mod allocations;
pub mod audit;
pub mod demands;
pub mod employees;
pub mod projects;
pub mod sessions;
pub mod skills;
pub mod tasks;
