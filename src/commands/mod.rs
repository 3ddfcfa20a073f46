// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod settings;
pub mod shell;
pub mod transactions;

use crate::app::App;
use crate::notice::NoticeKind;
use crate::transport::Transport;

pub const LOGIN_HINT: &str = "Not logged in. Run `fintrack login -u <username> -p <password>`.";

/// Print the notice left by the last action and, when the server dropped
/// the session, the login hint.
pub fn flush_notice<T: Transport>(app: &mut App<T>) {
    if let Some(n) = app.notices().take() {
        match n.kind {
            NoticeKind::Success => println!("{}", n.text),
            NoticeKind::Error => eprintln!("{}", n.text),
        }
    }
    if app.needs_login() {
        eprintln!("{}", LOGIN_HINT);
    }
}
