use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use sqljson::catalog::{self, Call};
use sqljson::expression::quote::quote_string;
use sqljson::parser::SqlParserAdapter;
use sqljson::registry;
use sqljson::{Argument, JsonPath, RenderConfig};

#[derive(Parser)]
#[command(name = "sqljson-tool")]
#[command(about = "Inspect and render MySQL JSON function expressions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the supported operations
    Catalog {
        #[arg(long)]
        json: bool,
    },
    /// Print a text value as a quoted SQL literal
    Quote { text: String },
    /// Validate a JSON path and print it as SQL text
    Path { path: String },
    /// Check that an expression parses as MySQL
    Check { sql: String },
    /// Render one operation; arguments starting with '$' are paths, others text
    Render {
        operation: String,
        args: Vec<String>,
        /// Render settings, e.g. "mode=bind;style=dollar"
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Catalog { json } => print_catalog(json),
        Command::Quote { text } => {
            println!("{}", quote_string(&text));
            Ok(())
        }
        Command::Path { path } => {
            let path = JsonPath::parse(&path).context("Invalid JSON path")?;
            println!("{}", path.quoted());
            Ok(())
        }
        Command::Check { sql } => {
            SqlParserAdapter::new()
                .check_expression(&sql)
                .with_context(|| format!("Expression does not parse: {}", sql))?;
            println!("OK");
            Ok(())
        }
        Command::Render {
            operation,
            args,
            config,
        } => render(&operation, &args, config.as_deref()),
    }
}

fn print_catalog(json: bool) -> Result<()> {
    if json {
        let text = registry::descriptors_json().context("Failed to export catalog")?;
        println!("{}", text);
        return Ok(());
    }

    for entry in catalog::entries() {
        let max = entry
            .max_args
            .map(|m| m.to_string())
            .unwrap_or_else(|| "*".to_string());
        println!(
            "{:<32} {:<10} {}..{:<3} {}",
            entry.key,
            format!("{:?}", entry.family),
            entry.min_args,
            max,
            entry.template
        );
    }
    Ok(())
}

fn render(operation: &str, args: &[String], config: Option<&str>) -> Result<()> {
    let entry = catalog::lookup(operation)?;
    let config = match config {
        Some(settings) => RenderConfig::parse(settings).context("Invalid render config")?,
        None => RenderConfig::default(),
    };

    let mut call = Call::new(entry.operation);
    for arg in args {
        let arg = if arg.starts_with(JsonPath::ROOT_MARKER) {
            Argument::from(JsonPath::parse(arg)?)
        } else {
            Argument::literal(arg.as_str())
        };
        call = call.arg(arg);
    }
    let expr = call
        .build()
        .map_err(|e| anyhow!("Cannot render {}: {}", entry.name, e))?;

    let rendered = expr.render_with(&config);
    println!("{}", rendered.sql);
    for (index, param) in rendered.params.iter().enumerate() {
        println!("  {} = {}", config.placeholder(index + 1), param);
    }
    Ok(())
}
