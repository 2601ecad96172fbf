// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries, backend-agnostic Diesel DSL.

pub mod allocations;
pub mod audit;
pub mod demands;
pub mod employees;
pub mod projects;
pub mod sessions;
pub mod skills;
pub mod tasks;
