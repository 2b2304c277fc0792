use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{Level, info, warn};

use crate::codec::{Decoder, Encoder};
use crate::config::DEFAULT_KEY_FILE;
use crate::key::KeyTable;
use crate::types::{Leniency, Mode, Summary};

type Input = Box<dyn AsyncRead + Unpin + Send>;
type Output = Box<dyn AsyncWrite + Unpin + Send>;

#[derive(Parser, Debug)]
#[command(name = "polybius-rs", version = "26.1.0", about = "Encode text to Polybius-square coordinates, or decode them back, using a CSV key.")]
pub struct App {
    /// Key file: one row per line, comma-separated cells.
    #[arg(short, long, default_value = DEFAULT_KEY_FILE)]
    key: PathBuf,

    /// Decode coordinate digits instead of encoding text.
    #[arg(short, long)]
    decode: bool,

    /// Reject non-digit input and a dangling digit instead of guessing.
    #[arg(long, requires = "decode")]
    strict: bool,

    /// Read from a file instead of standard input.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write to a file instead of standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log debug details to standard error.
    #[arg(short, long)]
    verbose: bool,
}

impl App {
    pub fn init() -> Result<Self> {
        let app = Self::parse();
        let level = if app.verbose { Level::DEBUG } else { Level::WARN };
        let subscriber = tracing_subscriber::fmt().with_file(true).with_line_number(true).with_max_level(level).with_writer(std::io::stderr).finish();
        tracing::subscriber::set_global_default(subscriber)?;
        Ok(app)
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        Mode::from_decode_flag(self.decode)
    }

    #[inline]
    pub fn leniency(&self) -> Leniency {
        Leniency::from_strict_flag(self.strict)
    }

    pub async fn execute(self) -> Result<()> {
        let mode = self.mode();
        let leniency = self.leniency();

        let table = KeyTable::load(&self.key).await.context("key load failed")?;
        info!(key = %self.key.display(), rows = table.nrows(), cols = table.ncols(), %mode, %leniency, "starting");

        let input = Self::open_input(self.input.as_deref()).await?;
        let output = Self::open_output(self.output.as_deref()).await?;

        let summary = Self::process(mode, leniency, &table, input, output).await.inspect_err(|e| warn!(error = %e, "stream aborted")).with_context(|| format!("{mode} failed"))?;

        if let Some(path) = &self.output {
            crate::ui::show_success(mode, summary, path)?;
        }

        Ok(())
    }

    async fn process(mode: Mode, leniency: Leniency, table: &KeyTable, input: Input, output: Output) -> crate::Result<Summary> {
        match mode {
            Mode::Encode => Encoder::new(table).encode_stream(input, output).await,
            Mode::Decode => Decoder::new(table, leniency).decode_stream(input, output).await,
        }
    }

    async fn open_input(path: Option<&Path>) -> Result<Input> {
        match path {
            Some(path) => {
                let file = tokio::fs::File::open(path).await.with_context(|| format!("failed to open input: {}", path.display()))?;
                Ok(Box::new(file))
            }
            None => Ok(Box::new(tokio::io::stdin())),
        }
    }

    async fn open_output(path: Option<&Path>) -> Result<Output> {
        let Some(path) = path else {
            return Ok(Box::new(tokio::io::stdout()));
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }

        let file = tokio::fs::File::create(path).await.with_context(|| format!("failed to create output: {}", path.display()))?;
        Ok(Box::new(file))
    }
}
