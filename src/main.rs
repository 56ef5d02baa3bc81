//! # Adcard CLI
//!
//! Command-line interface for rendering classified cards.
//!
//! ## Usage
//!
//! ```bash
//! # List card templates
//! adcard templates
//!
//! # Render a card to PNG and PDF
//! adcard render --template 1 --title "House for sale" \
//!     --phones "9876543210, 9123456780" --png card.png --pdf card.pdf
//!
//! # Print the PNG as a data URL
//! adcard render --template 2 --title "Bike for sale" --data-url
//!
//! # Start the web editor
//! adcard serve --listen 0.0.0.0:8080
//!
//! # Use a specific font
//! adcard --font NotoSansKannada-Regular.ttf --bold-font NotoSansKannada-Bold.ttf render ...
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use adcard::{
    AdcardError,
    composition::{Composition, PhoneLayout, StyleParams},
    export, font,
    render::{self, layout},
    server::{self, ServerConfig},
    template,
};

/// Adcard - classified card renderer
#[derive(Parser, Debug)]
#[command(name = "adcard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Regular-weight TrueType font (defaults to a system font, then the built-in bitmap font)
    #[arg(long, global = true, env = "ADCARD_FONT", value_name = "FILE")]
    font: Option<PathBuf>,

    /// Bold TrueType font (synthesized from the regular font when omitted)
    #[arg(long, global = true, env = "ADCARD_BOLD_FONT", value_name = "FILE")]
    bold_font: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available card templates
    Templates,

    /// Render a card to PNG and/or PDF
    Render {
        /// Template id (run `adcard templates` to list)
        #[arg(long)]
        template: u8,

        /// Card title (required)
        #[arg(long)]
        title: String,

        /// Body paragraph
        #[arg(long, default_value = "")]
        body: String,

        /// Phone numbers, comma or newline separated
        #[arg(long, default_value = "")]
        phones: String,

        /// Phone layout: vertical or horizontal
        #[arg(long, default_value = "vertical")]
        layout: String,

        /// Overlay a diagonal PREVIEW watermark
        #[arg(long)]
        watermark: bool,

        /// Title font size (30-80)
        #[arg(long, default_value = "56")]
        title_size: f32,

        /// Body font size (16-60)
        #[arg(long, default_value = "36")]
        body_size: f32,

        /// Phone font size (20-70)
        #[arg(long, default_value = "40")]
        phone_size: f32,

        /// Space between title and body (0-80)
        #[arg(long, default_value = "10")]
        title_body_spacing: f32,

        /// Space above the phone numbers (0-80)
        #[arg(long, default_value = "30")]
        body_phone_spacing: f32,

        /// Write the card as PNG
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,

        /// Write the card as a single-page PDF
        #[arg(long, value_name = "FILE")]
        pdf: Option<PathBuf>,

        /// Print the PNG data URL to stdout
        #[arg(long)]
        data_url: bool,
    },

    /// Start the web editor
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("adcard=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AdcardError> {
    let cli = Cli::parse();
    let font_config = font::FontConfig {
        regular: cli.font,
        bold: cli.bold_font,
    };

    match cli.command {
        Commands::Templates => {
            println!("Available templates:");
            for t in &template::TEMPLATES {
                println!(
                    "  {}  {:<8} background {}  border {} ({}px)",
                    t.id,
                    t.name,
                    t.background.to_hex(),
                    t.border.to_hex(),
                    t.border_width
                );
            }
        }

        Commands::Render {
            template,
            title,
            body,
            phones,
            layout: phone_layout,
            watermark,
            title_size,
            body_size,
            phone_size,
            title_body_spacing,
            body_phone_spacing,
            png,
            pdf,
            data_url,
        } => {
            if template::by_id(template).is_none() {
                return Err(AdcardError::Config(format!(
                    "Unknown template {}. Run `adcard templates` to see available options.",
                    template
                )));
            }
            if title.trim().is_empty() {
                return Err(AdcardError::Config("Title cannot be empty".to_string()));
            }
            let phone_layout = PhoneLayout::parse(&phone_layout).ok_or_else(|| {
                AdcardError::Config(format!(
                    "Unknown phone layout '{}' (expected vertical or horizontal)",
                    phone_layout
                ))
            })?;
            if png.is_none() && pdf.is_none() && !data_url {
                return Err(AdcardError::Config(
                    "Nothing to do: pass --png, --pdf or --data-url".to_string(),
                ));
            }

            let composition = Composition {
                template: Some(template),
                title,
                body,
                phones,
                phone_layout,
                watermark,
                style: StyleParams {
                    title_size,
                    body_size,
                    phone_size,
                    title_body_spacing,
                    body_phone_spacing,
                },
            }
            .sanitized();

            let typeface = font::load(&font_config)?;
            let mut surface =
                render::Surface::new(layout::CARD_WIDTH, layout::CARD_HEIGHT, typeface);
            let artifact = render::render_into(&mut surface, &composition)?
                .ok_or_else(|| AdcardError::Config("Nothing to render".to_string()))?;

            if let Some(path) = png {
                std::fs::write(&path, &artifact.png)?;
                println!("Saved PNG to {}", path.display());
            }
            if let Some(path) = pdf {
                let bytes = export::pdf_bytes(&surface)?;
                std::fs::write(&path, bytes)?;
                println!("Saved PDF to {}", path.display());
            }
            if data_url {
                println!("{}", artifact.data_url);
            }
        }

        Commands::Serve { listen } => {
            let typeface = font::load(&font_config)?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(ServerConfig { listen_addr: listen }, typeface))?;
        }
    }

    Ok(())
}
