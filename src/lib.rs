// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod editor;
pub mod error;
pub mod gateway;
pub mod models;
pub mod notice;
pub mod render;
pub mod session;
pub mod store;
pub mod transport;
pub mod utils;
