//! Hand-written companion files shipped next to the generated output.
//!
//! The generated Go code leans on a small set of fixed collaborators: the
//! URI types, the LSP error codes and `replyParseError`, the jsonrpc2
//! handler adapter, the `Logger` interface and the JSON codec facade. None
//! of these are generated; they are embedded here verbatim and written out
//! on request.

/// One fixed companion file: output name and verbatim contents.
pub struct Asset {
    pub name: &'static str,
    pub contents: &'static str,
}

/// All companion files, in write order.
pub const ASSETS: &[Asset] = &[
    Asset {
        name: "uri.go",
        contents: include_str!("../assets/uri.go"),
    },
    Asset {
        name: "errors.go",
        contents: include_str!("../assets/errors.go"),
    },
    Asset {
        name: "handler.go",
        contents: include_str!("../assets/handler.go"),
    },
    Asset {
        name: "logger.go",
        contents: include_str!("../assets/logger.go"),
    },
    Asset {
        name: "json.go",
        contents: include_str!("../assets/json.go"),
    },
];
