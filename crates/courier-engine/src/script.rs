//! Subprocess-based [`ScriptRuntime`].
//!
//! Each script runs in a fresh `node` process; inside it, the block source
//! is evaluated in a `node:vm` context seeded only with the allow-listed
//! bindings (a scoped module/exports object, the evaluator's `require`, and
//! `console`), never the host process's globals. The exported `handler` is
//! invoked with no arguments and its awaited result is handed back over
//! stdout behind a sentinel prefix, leaving `console` output untouched. Any
//! throw — compile, evaluate or handler — exits non-zero and surfaces as a
//! hard failure.

use async_trait::async_trait;
use courier_contract::{DispatchError, ScriptRuntime};
use serde_json::Value;
use std::process::Stdio;
use tokio::process::Command;

const RESULT_SENTINEL: &str = "@@courier:result@@";

const HARNESS_TEMPLATE: &str = r#"
const vm = require('node:vm');
const source = __SOURCE__;
const context = {
    require,
    console,
    module: { exports: {} },
};
vm.createContext(context);
new vm.Script(source).runInContext(context);
const { handler } = context.module.exports;
Promise.resolve()
    .then(() => handler())
    .then((data) => {
        process.stdout.write('__SENTINEL__' + JSON.stringify(data === undefined ? null : data) + '\n');
    })
    .catch((err) => {
        process.stderr.write(String((err && err.stack) || err) + '\n');
        process.exit(1);
    });
"#;

fn harness(source: &str) -> String {
    let encoded = Value::String(source.to_string()).to_string();
    HARNESS_TEMPLATE
        .replace("__SOURCE__", &encoded)
        .replace("__SENTINEL__", RESULT_SENTINEL)
}

/// Runs scripts in an isolated `node` subprocess.
pub struct NodeSandbox {
    program: String,
}

impl NodeSandbox {
    pub fn new() -> Self {
        Self {
            program: "node".to_string(),
        }
    }

    /// Use a specific interpreter binary.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for NodeSandbox {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScriptRuntime for NodeSandbox {
    async fn run(&self, source: &str) -> Result<Value, DispatchError> {
        let output = Command::new(&self.program)
            .arg("-e")
            .arg(harness(source))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(DispatchError::script)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.trim();
            if message.is_empty() {
                return Err(DispatchError::Script(format!(
                    "interpreter exited with {}",
                    output.status
                )));
            }
            return Err(DispatchError::Script(message.to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let payload = stdout
            .lines()
            .rev()
            .find_map(|line| line.strip_prefix(RESULT_SENTINEL))
            .ok_or_else(|| DispatchError::Script("script produced no result".to_string()))?;
        serde_json::from_str(payload).map_err(DispatchError::script)
    }
}
