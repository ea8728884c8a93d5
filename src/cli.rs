//! Minimal CLI: load the meta-model → generate → write.
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::assets::ASSETS;
use crate::error::Error;
use crate::generator::Generator;
use crate::model::Model;

const DEFAULT_REF: &str = "release/protocol/3.17.6-next.14";
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

// ------------------------------- Types ------------------------------------ //

/// Generate Go protocol sources from the LSP meta-model.
#[derive(Parser, Debug)]
#[command(name = "lspgen", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate and write the protocol source files
    Generate(GenerateArgs),
    /// load and index the model, print counts, write nothing
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// path to a local metaModel.json (skips download)
    #[arg(long)]
    model: Option<PathBuf>,

    /// git ref / tag to fetch metaModel.json from
    #[arg(long = "ref", default_value = DEFAULT_REF)]
    git_ref: String,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    input: InputSettings,

    /// output directory for generated files
    #[arg(short, long, default_value = "protocol")]
    out: PathBuf,

    /// also write the hand-written companion files (uri.go, errors.go, ...)
    #[arg(long)]
    emit_assets: bool,

    /// Debugging: print resolved CLI settings and then terminate
    #[arg(long)]
    no_op: bool,
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[command(flatten)]
    input: InputSettings,
}

// ---------------------------- Implementation ------------------------------ //

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Generate(target) => {
                // - DEBUG PATH -
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                // - LOAD MODEL -
                let model = target.input.load_model()?;
                print_counts(&model);

                // - GENERATE -
                let mut gen = Generator::new(&model);
                let out = gen.generate()?;

                // - WRITE -
                std::fs::create_dir_all(&target.out)
                    .with_context(|| format!("mkdir {}", target.out.display()))?;

                let files = [
                    ("types_gen.go", out.types.as_str()),
                    ("server_gen.go", out.server.as_str()),
                    ("client_gen.go", out.client.as_str()),
                ];

                for (name, contents) in files {
                    write_file(&target.out, name, contents)?;
                }

                if target.emit_assets {
                    for asset in ASSETS {
                        write_file(&target.out, asset.name, asset.contents)?;
                    }
                }

                Ok(())
            }
            Command::Check(target) => {
                let model = target.input.load_model()?;
                print_counts(&model);

                Ok(())
            }
        }
    }
}

impl InputSettings {
    /// Raw meta-model bytes, from a local file or downloaded from the
    /// vscode-languageserver-node repository at the configured ref.
    fn load_bytes(&self) -> Result<Vec<u8>, Error> {
        if let Some(path) = self.model.as_ref() {
            println!("Reading local model: {}", path.display());

            return Ok(std::fs::read(path)?);
        }

        let url = format!(
            "https://raw.githubusercontent.com/microsoft/vscode-languageserver-node/{}/protocol/metaModel.json",
            self.git_ref
        );

        println!("Downloading metaModel.json from {url}");

        let client = reqwest::blocking::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()?;

        let response = client.get(&url).send()?.error_for_status()?;

        Ok(response.bytes()?.to_vec())
    }

    fn load_model(&self) -> Result<Model, Error> {
        let bytes = self.load_bytes()?;

        Model::from_slice(&bytes)
    }
}

// ---------------------------- Internal helpers ---------------------------- //

fn print_counts(model: &Model) {
    println!("LSP version: {}", model.meta_data.version);
    println!("Structures:    {}", model.structures.len());
    println!("Enumerations:  {}", model.enumerations.len());
    println!("TypeAliases:   {}", model.type_aliases.len());
    println!("Requests:      {}", model.requests.len());
    println!("Notifications: {}", model.notifications.len());
}

fn write_file(dir: &Path, name: &str, contents: &str) -> Result<()> {
    let path = dir.join(name);
    std::fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    println!("Wrote {} ({} bytes)", path.display(), contents.len());

    Ok(())
}
