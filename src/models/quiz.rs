// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Arithmetic quiz tasks.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// A quiz task. `data` holds the two operands as `"a|b"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub data: String,
    #[serde(rename = "type")]
    pub operation: Operation,
}

impl Task {
    pub fn new(id: &str, data: &str, operation: Operation) -> Self {
        Self {
            id: id.to_string(),
            text: "Skriv resultatet av regneoperasjonen".to_string(),
            data: data.to_string(),
            operation,
        }
    }

    /// The correct answer, or `None` if the operands are malformed or the
    /// operation is undefined (division by zero).
    pub fn answer(&self) -> Option<f64> {
        let (a, b) = self.data.split_once('|')?;
        let a: f64 = a.trim().parse().ok()?;
        let b: f64 = b.trim().parse().ok()?;

        let result = match self.operation {
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            Operation::Multiply => a * b,
            Operation::Divide if b == 0.0 => return None,
            Operation::Divide => a / b,
        };
        Some(result)
    }
}

/// The fixed task catalog.
pub fn default_tasks() -> Vec<Task> {
    vec![
        Task::new("123", "9|2", Operation::Add),
        Task::new("234", "3|2", Operation::Add),
        Task::new("356", "3|2", Operation::Multiply),
    ]
}
