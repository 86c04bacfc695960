// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tracing::{error, info};

/// Fire-and-forget user messages, invoked after each commit attempt.
pub trait Notifier {
    /// Reports a committed change.
    fn success(&self, message: &str);

    /// Reports a rejected change.
    fn error(&self, message: &str);
}

/// A notifier that writes messages to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(message, "Schedule change committed");
    }

    fn error(&self, message: &str) {
        error!(message, "Schedule change failed");
    }
}
