// Copyright (c) 2025 FinControl contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod closing;
pub mod doctor;
pub mod importer;
pub mod rate;
pub mod reports;
pub mod savings;
pub mod transactions;
