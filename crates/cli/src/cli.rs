//! CLI argument parsing and command dispatch.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};

use varistock_inventory::{MatrixShape, ProductDocument, target_keys};

/// Variant stock matrix tooling.
#[derive(Parser, Debug)]
#[command(name = "varistock")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Fail when a dimension has no values (the matrix collapsed to `default`)
    #[arg(long, global = true, env = "VARISTOCK_STRICT")]
    strict: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconcile every warehouse of a product document and print the result
    Reconcile(ReconcileArgs),
    /// List the variant keys a product document derives, in generation order
    Variants(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Product document (JSON); `-` reads stdin
    #[arg(value_name = "PATH")]
    input: PathBuf,
}

#[derive(Args, Debug)]
struct ReconcileArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Indent the JSON output
    #[arg(long, env = "VARISTOCK_PRETTY")]
    pretty: bool,
}

impl Cli {
    /// Run the selected command and return what should go to stdout.
    pub fn execute(self) -> Result<String> {
        match self.command {
            Commands::Reconcile(args) => {
                let doc = load(&args.input.input)?;
                reconcile(doc, self.strict, args.pretty)
            }
            Commands::Variants(args) => {
                let doc = load(&args.input)?;
                variants(&doc, self.strict)
            }
        }
    }
}

fn load(path: &Path) -> Result<ProductDocument> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read product document from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    parse(&raw)
}

fn parse(raw: &str) -> Result<ProductDocument> {
    serde_json::from_str(raw).context("invalid product document")
}

fn check_shape(shape: &MatrixShape, strict: bool) -> Result<()> {
    if let MatrixShape::Exhausted { dimension } = shape {
        if strict {
            bail!("dimension '{dimension}' has no values; every variant collapsed to 'default'");
        }
        tracing::warn!(
            dimension = %dimension,
            "dimension has no values; every variant collapsed to 'default'"
        );
    }
    Ok(())
}

fn reconcile(doc: ProductDocument, strict: bool, pretty: bool) -> Result<String> {
    check_shape(&doc.shape(), strict)?;

    let (doc, reports) = doc.reconcile();
    for (warehouse, report) in doc.warehouses.iter().zip(&reports) {
        tracing::info!(
            location = %warehouse.location,
            kept = report.kept,
            added = report.added,
            dropped = report.dropped,
            "warehouse reconciled"
        );
    }

    let out = if pretty {
        serde_json::to_string_pretty(&doc)
    } else {
        serde_json::to_string(&doc)
    };
    out.context("failed to serialize product document")
}

fn variants(doc: &ProductDocument, strict: bool) -> Result<String> {
    check_shape(&doc.shape(), strict)?;
    Ok(target_keys(&doc.specifications).join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "specifications": [
            { "name": "color", "values": ["red", "blue"] },
            { "name": "size", "values": ["S", "M"] }
        ],
        "warehouses": [
            {
                "location": "north",
                "inventory": { "color:red,size:S": { "quantity": 3 }, "old": {} }
            }
        ]
    }"#;

    #[test]
    fn variants_lists_keys_in_generation_order() {
        let out = variants(&parse(DOC).unwrap(), false).unwrap();
        assert_eq!(
            out,
            "color:red,size:S\ncolor:red,size:M\ncolor:blue,size:S\ncolor:blue,size:M"
        );
    }

    #[test]
    fn reconcile_outputs_aligned_document() {
        let out = reconcile(parse(DOC).unwrap(), false, false).unwrap();
        let doc: ProductDocument = serde_json::from_str(&out).unwrap();
        let north = &doc.warehouses[0];
        assert_eq!(north.inventory.len(), 4);
        assert!(north.record("old").is_none());
        assert_eq!(north.record("color:red,size:S").map(|r| r.quantity), Some(3));
    }

    #[test]
    fn strict_mode_rejects_exhausted_dimension() {
        let doc = parse(r#"{ "specifications": [{ "name": "color", "values": [""] }] }"#).unwrap();
        assert!(variants(&doc, true).is_err());
        assert_eq!(variants(&doc, false).unwrap(), "default");
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(parse("{ not json").is_err());
    }

    #[test]
    fn parses_subcommands_and_global_flags() {
        let cli =
            Cli::try_parse_from(["varistock", "reconcile", "--pretty", "--strict", "doc.json"])
                .unwrap();
        assert!(cli.strict);
        match cli.command {
            Commands::Reconcile(args) => {
                assert!(args.pretty);
                assert_eq!(args.input.input, PathBuf::from("doc.json"));
            }
            Commands::Variants(_) => panic!("expected reconcile"),
        }
    }
}
