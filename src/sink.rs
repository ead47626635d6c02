// Copyright 2022 Alexander Krivács Schrøder
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// OR
//
// Licensed under the MIT License. See LICENSE-MIT for details.

use std::io::Write;
use std::sync::Mutex;

/// Human readable progress for whoever triggered the publish, e.g. a build
/// console.
pub trait DiagnosticSink: Send + Sync {
    fn write_line(&self, line: &str);
}

impl<W: Write + Send> DiagnosticSink for Mutex<W> {
    fn write_line(&self, line: &str) {
        // A poisoned console is still a console.
        let mut writer = self.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writeln!(writer, "{line}");
    }
}

/// Process wide warnings.
pub trait LogSink: Send + Sync {
    fn warn(&self, message: &str);
}

/// Forwards to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLog;

impl LogSink for TracingLog {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "github_checks_publisher", "{message}");
    }
}
