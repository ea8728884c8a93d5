//! Emission of the three generated Go source files.
//!
//! The files are produced in a fixed order (types, server, client): literal
//! promotion mutates generator state, and the types file snapshots the
//! promotion map at its end, so the sequence must not be reordered or run
//! in parallel.

pub mod client;
pub mod server;
pub mod types;

use std::fmt::{self, Write};

use chrono::Datelike;
use tracing::{debug, info};

use crate::error::Error;
use crate::generator::Generator;

/// The generated Go source files, one buffer per output file.
pub struct GeneratedOutput {
    /// Contents of `types_gen.go`.
    pub types: String,
    /// Contents of `server_gen.go`.
    pub server: String,
    /// Contents of `client_gen.go`.
    pub client: String,
}

impl<'m> Generator<'m> {
    /// Produce all generated source files from the loaded model.
    pub fn generate(&mut self) -> Result<GeneratedOutput, Error> {
        let model = self.model;
        info!(
            version = %model.meta_data.version,
            structures = model.structures.len(),
            enumerations = model.enumerations.len(),
            type_aliases = model.type_aliases.len(),
            requests = model.requests.len(),
            notifications = model.notifications.len(),
            "generating protocol sources"
        );

        let types = types::emit(self).map_err(|source| Error::Emit {
            file: "types",
            source,
        })?;
        debug!(bytes = types.len(), "emitted types file");

        let server = server::emit(self).map_err(|source| Error::Emit {
            file: "server",
            source,
        })?;
        debug!(bytes = server.len(), "emitted server file");

        let client = client::emit(self).map_err(|source| Error::Emit {
            file: "client",
            source,
        })?;
        debug!(bytes = client.len(), "emitted client file");

        Ok(GeneratedOutput {
            types,
            server,
            client,
        })
    }
}

// ------------------------------- Prologue --------------------------------- //

/// Standard file prologue: copyright with the current year, DO-NOT-EDIT
/// marker, LSP version, package clause and import block.
pub(crate) fn write_header(
    buf: &mut String,
    version: &str,
    package: &str,
    imports: &[&str],
) -> fmt::Result {
    writeln!(
        buf,
        "// Copyright {} The lspgen Authors.",
        chrono::Utc::now().year()
    )?;
    buf.push_str("// Licensed under the MIT License.\n\n");
    buf.push_str("// Code generated by lspgen; DO NOT EDIT.\n");
    writeln!(buf, "// LSP version: {version}\n")?;
    writeln!(buf, "package {package}\n")?;

    if !imports.is_empty() {
        buf.push_str("import (\n");

        for imp in imports {
            writeln!(buf, "\t{}", go_quote(imp))?;
        }

        buf.push_str(")\n\n");
    }

    Ok(())
}

// ----------------------------- Doc comments ------------------------------- //

/// Doc comment for a top-level declaration; pass-through of the meta-model
/// doc string with a one-line fallback.
pub(crate) fn write_doc(buf: &mut String, doc: &str, name: &str) -> fmt::Result {
    if doc.is_empty() {
        return writeln!(buf, "// {name} is an LSP type.");
    }

    for line in doc.trim().lines() {
        writeln!(buf, "// {}", line.trim())?;
    }

    Ok(())
}

/// Indented doc comment for a struct field or enum value; silent when the
/// meta-model carries none.
pub(crate) fn write_field_doc(buf: &mut String, doc: &str) -> fmt::Result {
    if doc.is_empty() {
        return Ok(());
    }

    for line in doc.trim().lines() {
        writeln!(buf, "\t// {}", line.trim())?;
    }

    Ok(())
}

/// Indented doc comment for an interface method.
pub(crate) fn write_method_doc(
    buf: &mut String,
    doc: &str,
    go_name: &str,
    method: &str,
) -> fmt::Result {
    if doc.is_empty() {
        return writeln!(buf, "\t// {go_name} handles the {} method.", go_quote(method));
    }

    for line in doc.trim().lines() {
        writeln!(buf, "\t// {}", line.trim())?;
    }

    Ok(())
}

/// Render a Go double-quoted string literal.
pub(crate) fn go_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');

    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }

    out.push('"');
    out
}
