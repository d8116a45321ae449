// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for remote data synchronization
//!
//! Covers the fetch policy tiers, the stores they rely on and the data
//! facade built on top.

mod data_tests;
mod fixtures;
mod tag_store_tests;
