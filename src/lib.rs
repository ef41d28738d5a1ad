// Copyright (c) 2025 FinControl contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod closing;
pub mod commands;
pub mod db;
pub mod engine;
pub mod models;
pub mod session;
pub mod store;
pub mod utils;
