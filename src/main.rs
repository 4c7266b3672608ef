use anyhow::Result;
use bytebuf::config::{CliConfig, DEFAULT_CONFIG_FILE};
use bytebuf::{BufferInput, ByteBuffer, Encoding};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bytebuf")]
#[command(about = "Inspect and convert fixed-size byte buffers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, help = "Config file path")]
    config: Option<String>,

    #[arg(long, help = "Output as JSON")]
    json: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print a zeroed buffer of the given size
    Alloc {
        size: usize,
        #[arg(long, help = "Output encoding")]
        to: Option<Encoding>,
    },
    /// Decode input and re-encode it
    Convert {
        input: String,
        #[arg(long, help = "Input encoding")]
        from: Option<Encoding>,
        #[arg(long, help = "Output encoding")]
        to: Option<Encoding>,
    },
    /// Copy out the bytes in [start, end)
    Slice {
        input: String,
        start: usize,
        end: Option<usize>,
        #[arg(long)]
        from: Option<Encoding>,
        #[arg(long)]
        to: Option<Encoding>,
    },
    /// Print the byte at an offset
    Read {
        input: String,
        #[arg(allow_negative_numbers = true)]
        offset: i64,
        #[arg(long)]
        from: Option<Encoding>,
    },
    /// Overwrite the byte at an offset (value is masked to 8 bits)
    Set {
        input: String,
        #[arg(allow_negative_numbers = true)]
        offset: i64,
        #[arg(allow_negative_numbers = true)]
        value: i64,
        #[arg(long)]
        from: Option<Encoding>,
        #[arg(long)]
        to: Option<Encoding>,
    },
    /// Write text into a zeroed buffer, dropping whatever does not fit
    Write {
        size: usize,
        text: String,
        #[arg(long, help = "Encoding of the text")]
        encoding: Option<Encoding>,
        #[arg(long)]
        to: Option<Encoding>,
    },
    /// Build a buffer from a JSON size, string or byte array
    Parse {
        value: String,
        #[arg(long, help = "Encoding for string values")]
        from: Option<Encoding>,
        #[arg(long)]
        to: Option<Encoding>,
    },
    GenerateConfig {
        #[arg(long, default_value = DEFAULT_CONFIG_FILE, help = "Config file path")]
        output: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    debug!("Using config {:?}", config);

    let json = cli.json || config.json;
    let input_encoding = |enc: Option<Encoding>| enc.unwrap_or(config.input_encoding);
    let output_encoding = |enc: Option<Encoding>| enc.unwrap_or(config.output_encoding);

    match cli.command {
        Commands::Alloc { size, to } => {
            let buf = ByteBuffer::try_alloc(size)?;
            print_buffer(json, &buf, output_encoding(to))?;
        }
        Commands::Convert { input, from, to } => {
            let buf = ByteBuffer::from_text(&input, input_encoding(from))?;
            print_buffer(json, &buf, output_encoding(to))?;
        }
        Commands::Slice { input, start, end, from, to } => {
            let buf = ByteBuffer::from_text(&input, input_encoding(from))?;
            let part = buf.slice(start, end);
            debug!("Sliced {} of {} bytes", part.len(), buf.len());
            print_buffer(json, &part, output_encoding(to))?;
        }
        Commands::Read { input, offset, from } => {
            let buf = ByteBuffer::from_text(&input, input_encoding(from))?;
            let index = buf.checked_offset(offset)?;
            let value = buf.read_u8(index)?;
            if json {
                println!("{}", serde_json::json!({ "offset": index, "value": value }));
            } else {
                println!("{}", value);
            }
        }
        Commands::Set { input, offset, value, from, to } => {
            let mut buf = ByteBuffer::from_text(&input, input_encoding(from))?;
            let index = buf.checked_offset(offset)?;
            buf.set(value, index)?;
            print_buffer(json, &buf, output_encoding(to))?;
        }
        Commands::Write { size, text, encoding, to } => {
            let mut buf = ByteBuffer::try_alloc(size)?;
            let written = buf.write(&text, input_encoding(encoding))?;
            let to = output_encoding(to);
            if json {
                let out = serde_json::json!({
                    "written": written,
                    "length": buf.len(),
                    "encoding": to,
                    "data": buf.to_string_as(to),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{} bytes written", written);
                println!("{}", buf.to_string_as(to));
            }
        }
        Commands::Parse { value, from, to } => {
            let value: serde_json::Value = serde_json::from_str(&value)?;
            let input = BufferInput::from_json(&value, input_encoding(from))?;
            let buf = ByteBuffer::new(input)?;
            print_buffer(json, &buf, output_encoding(to))?;
        }
        Commands::GenerateConfig { output } => {
            CliConfig::default().save(&output)?;
            info!("Wrote default config to {}", output);
            if json {
                println!("{}", serde_json::json!({ "config": output }));
            } else {
                println!("Generated config file: {}", output);
            }
        }
    }

    Ok(())
}

fn print_buffer(json: bool, buf: &ByteBuffer, encoding: Encoding) -> Result<()> {
    if json {
        let out = serde_json::json!({
            "length": buf.len(),
            "encoding": encoding,
            "data": buf.to_string_as(encoding),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", buf.to_string_as(encoding));
    }
    Ok(())
}
