/*!
payload.rs - pass-through payload commands.

Most commands forward a caller-built JSON body untouched:
  <command> [JSON]           inline payload, `{}` when omitted
  <command> --file <PATH>    payload read from a JSON or YAML file

`tool <NAME>` is the generic escape hatch: NAME becomes the last path
segment under `/cocos/tool/`.
*/

use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

use super::input::{InputError, load_payload_file, parse_json_arg};

#[derive(Args, Debug, Default, Clone)]
pub struct PayloadArgs {
    /// JSON payload (defaults to {})
    #[arg(value_name = "JSON")]
    pub json: Option<String>,

    /// Read the payload from a JSON or YAML (.yaml/.yml) file
    #[arg(short = 'f', long = "file", value_name = "PATH", conflicts_with = "json")]
    pub file: Option<PathBuf>,
}

impl PayloadArgs {
    pub fn body(&self) -> Result<Value, InputError> {
        match &self.file {
            Some(path) => load_payload_file(path),
            None => parse_json_arg(self.json.as_deref()),
        }
    }
}

#[derive(Args, Debug)]
pub struct ToolArgs {
    /// Tool name, e.g. query_nodes
    #[arg(value_name = "TOOL_NAME")]
    pub name: String,

    #[command(flatten)]
    pub payload: PayloadArgs,
}

impl ToolArgs {
    /// `/cocos/tool/<name>`, with the name percent-encoded as one segment.
    pub fn path(&self) -> Result<String, InputError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(InputError::EmptyToolName);
        }
        Ok(format!("/cocos/tool/{}", urlencoding::encode(name)))
    }
}
