/*!
Command modules.

Every subcommand turns into exactly one `ApiRequest`; `main.rs` owns the
command table and this module supplies the pieces:

  src/cmd/
    mod.rs          (this file)
    nodes.rs        context / search-nodes / query-nodes (typed flags)
    payload.rs      pass-through JSON payload commands + generic `tool`
    discovery.rs    discovery <components|assets|assets-by-type>
    input.rs        payload parsing + InputError
    output.rs       result / error rendering

Conventions:
  - Argument structs derive `clap::Args` and expose `payload()` / `body()`
    or `request()`; none of them perform I/O beyond reading a payload file.
  - Input errors surface as `InputError` before any request is sent.
*/

pub mod discovery;
pub mod input;
pub mod nodes;
pub mod output;
pub mod payload;

pub use discovery::DiscoveryArgs;
pub use input::InputError;
pub use nodes::{ContextArgs, QueryNodesArgs, SearchNodesArgs};
pub use output::{render, render_error};
pub use payload::{PayloadArgs, ToolArgs};
